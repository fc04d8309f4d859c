use anyhow::Result;
use ndarray::{Array2, array};
use dinf_flow::{dinf_pointer, FlowDirection};

fn main() -> Result<()> {
    env_logger::init();

    let filled: Array2<f64> = array![
        [2.0, 3.0, 3.0, 7.0, 6.0],
        [3.0, 5.0, 4.0, 2.0, 5.0],
        [5.0, 6.0, 8.0, 3.0, 6.0],
        [6.0, 7.0, 9.0, 5.0, 7.0],
    ];
    let nd: f64 = -100.0;
    println!("Running dinf on {filled}");
    let (dirs, dirs_nd) = dinf_pointer(&filled, nd)?;
    println!("dinf is {dirs:.4}");

    for ((row, col), v) in dirs.indexed_iter() {
        if let FlowDirection::Angle(a) = FlowDirection::from_cell(*v, dirs_nd) {
            println!("({row}, {col}) drains towards {:.1} degrees", a.to_degrees());
        }
    }

    Ok(())
}
