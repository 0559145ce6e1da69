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

// config.rs
//
// This file contains the configuration struct for the scheduler. It
// defines the hardware parameters: result buses, functional unit counts
// per class, fetch width, and the runaway-simulation cycle cap.

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Result buses available per cycle (completion broadcast slots)
    pub result_buses: usize,
    /// Functional units per op class (K0, K1, K2)
    pub fu_counts: [usize; 3],
    /// Instructions fetched from the trace per cycle
    pub fetch_width: usize,
    /// Hard cycle cap; the simulation stops unconditionally past it
    pub max_cycles: u64,
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self {
            result_buses: 8,
            fu_counts: [1, 2, 3],
            fetch_width: 4,
            max_cycles: 1_000_000,
        }
    }

    pub fn with_result_buses(mut self, num: usize) -> Self {
        assert!(num > 0, "Result bus count must be positive");
        self.result_buses = num;
        self
    }

    pub fn with_fu_counts(mut self, k0: usize, k1: usize, k2: usize) -> Self {
        assert!(
            k0 > 0 && k1 > 0 && k2 > 0,
            "Functional unit counts must be positive"
        );
        self.fu_counts = [k0, k1, k2];
        self
    }

    pub fn with_fetch_width(mut self, width: usize) -> Self {
        assert!(width > 0, "Fetch width must be positive");
        self.fetch_width = width;
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        assert!(max_cycles > 0, "Cycle cap must be positive");
        self.max_cycles = max_cycles;
        self
    }

    /// Reservation station capacity is twice the total functional unit
    /// count.
    pub fn rs_capacity(&self) -> usize {
        2 * (self.fu_counts[0] + self.fu_counts[1] + self.fu_counts[2])
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}
