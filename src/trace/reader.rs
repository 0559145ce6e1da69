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

// reader.rs
//
// This file contains the text trace reader. Each trace line carries one
// decoded instruction: a hexadecimal address followed by the op code,
// destination register, and two source registers in signed decimal.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::SimulatorError;
use crate::trace::{DecodedInstruction, TraceSource};

pub struct TraceReader<R: BufRead> {
    reader: R,
    line_number: usize,
}

impl TraceReader<BufReader<File>> {
    /// Open a trace file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SimulatorError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
        }
    }

    fn malformed(&self, content: &str) -> SimulatorError {
        SimulatorError::MalformedTraceRecord {
            line: self.line_number,
            content: content.to_string(),
        }
    }

    fn parse_record(&self, line: &str) -> Result<DecodedInstruction, SimulatorError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(self.malformed(line));
        }

        let address_field = fields[0]
            .strip_prefix("0x")
            .or_else(|| fields[0].strip_prefix("0X"))
            .unwrap_or(fields[0]);
        let address =
            u32::from_str_radix(address_field, 16).map_err(|_| self.malformed(line))?;

        let mut numbers = [0i32; 4];
        for (slot, field) in numbers.iter_mut().zip(&fields[1..]) {
            *slot = field.parse().map_err(|_| self.malformed(line))?;
        }

        // Only op codes the functional units know about are accepted; -1 is
        // the "unknown" sentinel the scheduler routes to class 1.
        let op_code = numbers[0];
        if !(-1..=2).contains(&op_code) {
            return Err(self.malformed(line));
        }

        Ok(DecodedInstruction {
            address,
            op_code,
            dest_reg: numbers[1],
            src_reg: [numbers[2], numbers[3]],
        })
    }
}

impl<R: BufRead> TraceSource for TraceReader<R> {
    fn next_instruction(&mut self) -> Result<Option<DecodedInstruction>, SimulatorError> {
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return self.parse_record(trimmed).map(Some);
        }
    }
}
