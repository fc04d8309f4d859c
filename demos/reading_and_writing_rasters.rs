use std::path::PathBuf;

use anyhow::Result;
use tempfile::NamedTempFile;
use ndarray::{Array2, array};
use dinf_flow::{rasterfile_to_array, array_to_rasterfile, dinf_pointer};

fn main() -> Result<()> {
    env_logger::init();

    let dem: Array2<f32> = array![
        [10.0, 12.0, 10.0, 10.0],
        [12.0, 1.0,  10.0, 12.0],
        [10.0, 12.0, 10.0, 9.0],
        [11.0, 11.0, 8.0, 7.0],
    ];
    let nd: f32 = -100.0;
    let geo: [f64;6] = [1361171.0, 8.0, 0.0, 5006315.0, 0.0, -8.0];
    let gdir  = [1u64, 1, 0, 7, 1024, 0, 1, 1, 1025, 0, 1, 1, 1026, 34737, 48, 0, 2049, 34737, 9, 48, 2054, 0, 1, 9102, 3072, 0, 1, 2193, 3076, 0, 1, 9001];
    let proj: &str = "NZGD2000 / New Zealand Transverse Mercator 2000|NZGD2000|";

    // pass a DEM path on the command line to use a real one
    let (ifn, _tmp) = match std::env::args().nth(1) {
        Some(path) => (PathBuf::from(path), None),
        None => {
            let tmp = NamedTempFile::new()?;
            let path = tmp.path().to_path_buf();
            println!("Writing DEM to {:?}", path);
            array_to_rasterfile::<f32>(&dem, nd, &geo, &gdir, proj, &path)?;
            (path, Some(tmp))
        }
    };

    println!("Reading {:?}", ifn);
    let (dem, nd, crs, geo, gdir, proj) = rasterfile_to_array::<f64>(&ifn)?;
    println!("EPSG:{crs}, {} rows x {} columns, no-data {nd}", dem.nrows(), dem.ncols());

    let (dirs, dirs_nd) = dinf_pointer(&dem, nd)?;

    let out = NamedTempFile::new()?;
    let ofn: PathBuf = out.path().to_path_buf();
    println!("Writing dinf directions to {:?}", ofn);
    array_to_rasterfile::<f64>(&dirs, dirs_nd, &geo, &gdir, &proj, &ofn)?;

    let (dirs_new, nd_new, ..) = rasterfile_to_array::<f64>(&ofn)?;
    assert_eq!(dirs_new, dirs);
    assert_eq!(nd_new, dirs_nd);

    out.close()?;

    Ok(())
}
