#[cfg(test)]
mod tests {
    use dinf_flow::{array_to_rasterfile, dinf_pointer, rasterfile_to_array, Error, NODATA_DIR};
    use ndarray::{Array2, array};
    use tempfile::NamedTempFile;

    const GEO: [f64; 6] = [1361171.0, 8.0, 0.0, 5006315.0, 0.0, -8.0];
    const GDIR: [u64; 32] = [
        1, 1, 0, 7, 1024, 0, 1, 1, 1025, 0, 1, 1, 1026, 34737, 48, 0, 2049, 34737, 9, 48, 2054,
        0, 1, 9102, 3072, 0, 1, 2193, 3076, 0, 1, 9001,
    ];
    const PROJ: &str = "NZGD2000 / New Zealand Transverse Mercator 2000|NZGD2000|";

    #[test]
    fn test_dem_to_directions_file() {
        let dem: Array2<f32> = array![
            [10.0, 10.0, 10.0, 10.0],
            [10.0, 6.0, 5.0, 10.0],
            [10.0, 7.0, -100.0, 4.0],
            [10.0, 10.0, 10.0, 10.0],
        ];
        let dem_file = NamedTempFile::new().unwrap();
        array_to_rasterfile::<f32>(&dem, -100.0, &GEO, &GDIR, PROJ, dem_file.path()).unwrap();

        let (dem_in, nd, crs, geo, gdir, proj) = rasterfile_to_array::<f64>(dem_file.path()).unwrap();
        assert_eq!(dem_in, dem.mapv(f64::from));
        assert_eq!(nd, -100.0);
        assert_eq!(crs, 2193);
        assert_eq!(geo, GEO);
        assert_eq!(gdir, GDIR.to_vec());
        assert_eq!(proj, PROJ);

        let (dirs, dirs_nd) = dinf_pointer(&dem_in, nd).unwrap();
        assert_eq!(dirs[[2, 2]], NODATA_DIR);

        let dirs_file = NamedTempFile::new().unwrap();
        array_to_rasterfile::<f64>(&dirs, dirs_nd, &geo, &gdir, &proj, dirs_file.path()).unwrap();
        let (dirs_in, nd_in, _, geo_in, _, _) = rasterfile_to_array::<f64>(dirs_file.path()).unwrap();
        assert_eq!(dirs_in, dirs);
        assert_eq!(nd_in, NODATA_DIR);
        assert_eq!(geo_in, GEO);
    }

    #[test]
    fn test_samples_that_do_not_fit() {
        let dem: Array2<f32> = array![[1.0, 300.0], [2.0, 3.0]];
        let file = NamedTempFile::new().unwrap();
        array_to_rasterfile::<f32>(&dem, -1.0, &GEO, &[], "", file.path()).unwrap();
        assert!(matches!(
            rasterfile_to_array::<u8>(file.path()),
            Err(Error::SampleCast)
        ));

        let (small, _, crs, _, gdir, proj) = rasterfile_to_array::<i16>(file.path()).unwrap();
        assert_eq!(small, array![[1, 300], [2, 3]]);
        assert_eq!(crs, 0);
        assert!(gdir.is_empty());
        assert!(proj.is_empty());
    }

    #[test]
    fn test_geokey_too_large() {
        let dem: Array2<u8> = array![[1, 2], [3, 4]];
        let file = NamedTempFile::new().unwrap();
        let res = array_to_rasterfile::<u8>(&dem, 0, &GEO, &[1, 1, 0, 70000], "", file.path());
        assert!(matches!(res, Err(Error::GeoKey(70000))));
    }
}
