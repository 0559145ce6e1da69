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

// stats.rs
//
// This file contains the aggregate statistics produced by a simulation
// run, with a human-readable Display rendering and JSON serialization.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchedulerStats {
    /// Total instructions that received a tag and retired
    pub retired_instruction: u64,
    /// Final cycle number at termination
    pub cycle_count: u64,
    /// Fired instructions per cycle
    pub avg_inst_fired: f64,
    /// Retired instructions per cycle
    pub avg_inst_retired: f64,
    /// Largest dispatch queue observed at dispatch time
    pub max_disp_size: usize,
    /// Mean dispatch queue size over non-empty samples
    pub avg_disp_size: f64,
}

impl fmt::Display for SchedulerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scheduler Statistics:\n")?;
        write!(f, "  Cycles: {}\n", self.cycle_count)?;
        write!(f, "  Instructions Retired: {}\n", self.retired_instruction)?;
        write!(
            f,
            "  Avg Instructions Fired Per Cycle: {:.3}\n",
            self.avg_inst_fired
        )?;
        write!(
            f,
            "  Avg Instructions Retired Per Cycle: {:.3}\n",
            self.avg_inst_retired
        )?;
        write!(f, "  Max Dispatch Queue Size: {}\n", self.max_disp_size)?;
        write!(f, "  Avg Dispatch Queue Size: {:.3}", self.avg_disp_size)
    }
}
