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

// generator.rs
//
// This file contains a seeded pseudo-random trace generator. It produces
// syntactically valid instruction streams for benchmarking and for
// experimenting with scheduler configurations. The same seed always yields
// the same trace.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::SimulatorError;
use crate::trace::{DecodedInstruction, TraceSource};

// Probabilities that an instruction names a destination / a source register.
const DEST_PROBABILITY: f64 = 0.9;
const SRC_PROBABILITY: f64 = 0.75;

pub struct TraceGenerator {
    rng: StdRng,
    remaining: usize,
    num_registers: i32,
    next_address: u32,
}

impl TraceGenerator {
    pub fn new(seed: u64, count: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            remaining: count,
            num_registers: 32,
            next_address: 0x0040_0000,
        }
    }

    /// Restrict generated register ids to [0, regs). Smaller register files
    /// raise dependency pressure.
    pub fn with_register_count(mut self, regs: i32) -> Self {
        assert!(
            regs > 0 && regs <= 128,
            "Register count must be in 1..=128"
        );
        self.num_registers = regs;
        self
    }

    fn pick_register(&mut self, probability: f64) -> i32 {
        if self.rng.gen_bool(probability) {
            self.rng.gen_range(0..self.num_registers)
        } else {
            -1
        }
    }
}

impl TraceSource for TraceGenerator {
    fn next_instruction(&mut self) -> Result<Option<DecodedInstruction>, SimulatorError> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;

        let address = self.next_address;
        self.next_address = self.next_address.wrapping_add(4);

        let op_code = self.rng.gen_range(-1..=2);
        let dest_reg = self.pick_register(DEST_PROBABILITY);
        let src_reg = [
            self.pick_register(SRC_PROBABILITY),
            self.pick_register(SRC_PROBABILITY),
        ];

        Ok(Some(DecodedInstruction {
            address,
            op_code,
            dest_reg,
            src_reg,
        }))
    }
}
