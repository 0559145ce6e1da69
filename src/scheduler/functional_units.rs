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

// functional_units.rs
//
// This file contains the tag-occupancy tables for the three functional
// unit classes. A slot holds 0 when free, otherwise the tag of the
// instruction executing in it. An instruction reserves a slot when it
// fires and releases it when it completes.

use super::instruction::OpClass;

#[derive(Debug, Clone)]
pub struct FunctionalUnits {
    pub slots: [Vec<u64>; 3],
}

impl FunctionalUnits {
    pub fn new(counts: [usize; 3]) -> Self {
        Self {
            slots: [
                vec![0; counts[0]],
                vec![0; counts[1]],
                vec![0; counts[2]],
            ],
        }
    }

    /// Claim the first free slot of the class. Returns false when every
    /// unit of that class is busy.
    pub fn allocate(&mut self, class: OpClass, tag: u64) -> bool {
        for slot in &mut self.slots[class.index()] {
            if *slot == 0 {
                *slot = tag;
                return true;
            }
        }
        false
    }

    /// Free the slot held by `tag`. A tag that is not present is ignored.
    pub fn release(&mut self, class: OpClass, tag: u64) {
        for slot in &mut self.slots[class.index()] {
            if *slot == tag {
                *slot = 0;
                break;
            }
        }
    }

    /// Number of busy slots in one class.
    pub fn busy_count(&self, class: OpClass) -> usize {
        self.slots[class.index()].iter().filter(|&&t| t != 0).count()
    }

    /// Every tag currently executing, across all classes.
    pub fn occupied_tags(&self) -> Vec<u64> {
        self.slots
            .iter()
            .flatten()
            .copied()
            .filter(|&t| t != 0)
            .collect()
    }
}
