use crate::prelude::*;
use csv::Writer;
use std::path::Path;

pub fn write_losses_to_csv<P: AsRef<Path>>(losses: &[f64], file_path: P) -> Result<()> {
    let mut wtr = Writer::from_path(file_path)?;
    wtr.write_record(["epoch", "loss"])?;

    for (epoch, loss) in losses.iter().enumerate() {
        wtr.write_record(&[epoch.to_string(), loss.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}
