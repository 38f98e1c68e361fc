//! Final-state report
//!
//! One line per body (1-based index, position, velocity) followed by the
//! wall-clock time of the run.

use std::io::{self, Write};
use std::time::Duration;

use crate::simulation::states::SimulationState;

pub fn write_report<W: Write>(out: &mut W, sys: &SimulationState, elapsed: Duration) -> io::Result<()> {
    for (i, b) in sys.bodies().enumerate() {
        writeln!(out, "Body {} : {:.6}\t{:.6}\t{:.6}\t{:.6}", i + 1, b.x.x, b.x.y, b.v.x, b.v.y)?;
    }
    writeln!(out)?;
    writeln!(out, "Time is : {:.6}", elapsed.as_secs_f64())?;
    Ok(())
}
