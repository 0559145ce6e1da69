// Copyright (c) 2024 Mudit Bhargava
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
//

// logger.rs
//
// This file contains the per-cycle scoreboard log writer. It appends one
// scoreboard snapshot per simulated cycle to a log file, with an optional
// sampling interval so long runs stay readable, and a statistics summary
// at the end of the run.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::errors::SimulatorError;
use crate::scheduler::stats::SchedulerStats;

pub struct CycleLogger {
    file: File,
    interval: u64,
}

impl CycleLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SimulatorError> {
        Ok(Self {
            file: File::create(path)?,
            interval: 1,
        })
    }

    /// Keep every Nth cycle, starting from cycle 1.
    pub fn with_interval(mut self, interval: u64) -> Self {
        assert!(interval > 0, "Log interval must be positive");
        self.interval = interval;
        self
    }

    fn selected(&self, cycle: u64) -> bool {
        (cycle - 1) % self.interval == 0
    }

    /// Append the scoreboard snapshot for one cycle, subject to the
    /// sampling interval.
    pub fn record_cycle(&mut self, cycle: u64, scoreboard: &str) -> Result<(), SimulatorError> {
        if !self.selected(cycle) {
            return Ok(());
        }
        writeln!(self.file, "=== Cycle {} ===", cycle)?;
        self.file.write_all(scoreboard.as_bytes())?;
        Ok(())
    }

    /// Close out the log with the run's aggregate statistics.
    pub fn write_summary(&mut self, stats: &SchedulerStats) -> Result<(), SimulatorError> {
        writeln!(self.file, "=== Run Summary ===")?;
        writeln!(self.file, "{}", stats)?;
        Ok(())
    }
}
