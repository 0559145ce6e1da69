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

// simulator.rs
//
// This file contains the cycle-driven scheduler. Each cycle runs six
// stages against the shared scoreboard state, in this exact order:
// state-update, execute, schedule, broadcast, retire, dispatch refill,
// fetch. State-update runs before execute so that a unit freed by a
// completing instruction can be claimed in the same cycle; schedule runs
// before broadcast so that a just-scheduled instruction is woken by a
// producer completing in the same cycle.

use std::collections::VecDeque;

use log::debug;

use super::config::SchedulerConfig;
use super::functional_units::FunctionalUnits;
use super::instruction::InflightInstruction;
use super::rename::RegisterAliasTable;
use super::stats::SchedulerStats;
use crate::errors::SimulatorError;
use crate::trace::TraceSource;

pub struct Simulator<T: TraceSource> {
    pub config: SchedulerConfig,

    /// Current clock cycle, starting at 1
    pub cycle: u64,
    /// Scheduled instructions, in schedule order, until retirement
    pub reservation_station: Vec<InflightInstruction>,
    /// Tagged instructions waiting for a reservation station slot
    pub dispatch_queue: VecDeque<InflightInstruction>,
    /// Instructions fetched this cycle, dispatched on the next
    pub fetch_buffer: Vec<InflightInstruction>,
    pub functional_units: FunctionalUnits,
    pub rename_table: RegisterAliasTable,
    pub trace_done: bool,

    trace: T,
    next_tag: u64,
    total_instructions: u64,
    total_fired: u64,
    disp_size_sum: u64,
    disp_samples: u64,
    max_disp_size: usize,
}

impl<T: TraceSource> Simulator<T> {
    pub fn new(config: SchedulerConfig, trace: T) -> Self {
        let functional_units = FunctionalUnits::new(config.fu_counts);
        Self {
            config,
            cycle: 1,
            reservation_station: Vec::new(),
            dispatch_queue: VecDeque::new(),
            fetch_buffer: Vec::new(),
            functional_units,
            rename_table: RegisterAliasTable::new(),
            trace_done: false,
            trace,
            next_tag: 1,
            total_instructions: 0,
            total_fired: 0,
            disp_size_sum: 0,
            disp_samples: 0,
            max_disp_size: 0,
        }
    }

    /// Advance the simulation by one clock cycle. Returns true while more
    /// cycles remain; once it returns false, `cycle` holds the final cycle
    /// number and `stats` gives the aggregate results.
    pub fn step(&mut self) -> Result<bool, SimulatorError> {
        let broadcast_tags = self.state_update();
        self.execute();
        self.schedule();
        self.broadcast(&broadcast_tags);
        self.retire();
        self.dispatch_refill();
        self.fetch()?;

        if self.drained() || self.cycle > self.config.max_cycles {
            return Ok(false);
        }
        self.cycle += 1;
        Ok(true)
    }

    /// Run the simulation to completion and return the final statistics.
    pub fn run(&mut self) -> Result<SchedulerStats, SimulatorError> {
        while self.step()? {}
        Ok(self.stats())
    }

    /// True when the trace has no more to give and no instruction remains
    /// anywhere in the pipeline.
    fn drained(&self) -> bool {
        self.trace_done
            && self.fetch_buffer.is_empty()
            && self.dispatch_queue.is_empty()
            && self.reservation_station.is_empty()
    }

    /// Completion stage. Instructions that fired in an earlier cycle have
    /// finished their single cycle of execution; up to R of them win a
    /// result bus this cycle. Winners are stamped, drop their rename-table
    /// entry if they still own it, and free their functional unit. Losers
    /// keep their unit and retry next cycle.
    fn state_update(&mut self) -> Vec<u64> {
        let mut candidates: Vec<usize> = (0..self.reservation_station.len())
            .filter(|&i| {
                let inst = &self.reservation_station[i];
                inst.fired && inst.complete_cycle == 0 && inst.fire_cycle < self.cycle
            })
            .collect();

        // Oldest fire wins a bus; ties go to the smaller tag (program
        // order).
        candidates.sort_by_key(|&i| {
            let inst = &self.reservation_station[i];
            (inst.fire_cycle, inst.tag)
        });
        candidates.truncate(self.config.result_buses);

        let mut broadcast_tags = Vec::with_capacity(candidates.len());
        for idx in candidates {
            let inst = &mut self.reservation_station[idx];
            inst.complete_cycle = self.cycle;
            let (tag, dest_reg, class) = (inst.tag, inst.dest_reg, inst.op_class());

            self.rename_table.release(dest_reg, tag);
            self.functional_units.release(class, tag);
            broadcast_tags.push(tag);
            debug!("cycle {}: tag {} completed", self.cycle, tag);
        }
        broadcast_tags
    }

    /// Execute stage. Ready instructions fire in program order; each one
    /// takes the first free unit of its class or stays put until a later
    /// cycle. A full class never blocks another class.
    fn execute(&mut self) {
        let mut ready: Vec<usize> = (0..self.reservation_station.len())
            .filter(|&i| self.reservation_station[i].ready_to_fire())
            .collect();
        ready.sort_by_key(|&i| self.reservation_station[i].tag);

        for idx in ready {
            let class = self.reservation_station[idx].op_class();
            let tag = self.reservation_station[idx].tag;
            if self.functional_units.allocate(class, tag) {
                let inst = &mut self.reservation_station[idx];
                inst.fired = true;
                inst.fire_cycle = self.cycle;
                inst.execute_cycle = self.cycle;
                self.total_fired += 1;
                debug!("cycle {}: tag {} fired", self.cycle, tag);
            }
        }
    }

    /// Schedule stage. Moves as many head-of-queue instructions into the
    /// reservation station as capacity permits, renaming each source
    /// against the alias table and installing the destination producer.
    /// Renaming reads the table as it stood at the start of the cycle;
    /// producers completing this cycle wake the entry in broadcast below.
    fn schedule(&mut self) {
        let free = self
            .config
            .rs_capacity()
            .saturating_sub(self.reservation_station.len());
        let count = free.min(self.dispatch_queue.len());

        for _ in 0..count {
            if let Some(mut inst) = self.dispatch_queue.pop_front() {
                inst.schedule_cycle = self.cycle;
                for i in 0..2 {
                    inst.src_tag[i] = self.rename_table.producer(inst.src_reg[i]).unwrap_or(0);
                }
                self.rename_table.install(inst.dest_reg, inst.tag);
                debug!("cycle {}: tag {} scheduled", self.cycle, inst.tag);
                self.reservation_station.push(inst);
            }
        }
    }

    /// Broadcast stage: wake unfired instructions waiting on the tags that
    /// won a result bus this cycle.
    fn broadcast(&mut self, tags: &[u64]) {
        for &tag in tags {
            for inst in &mut self.reservation_station {
                if inst.fired {
                    continue;
                }
                for i in 0..2 {
                    if inst.src_tag[i] == tag {
                        inst.src_tag[i] = 0;
                    }
                }
            }
        }
    }

    /// Retire stage: evict entries that completed in a strictly earlier
    /// cycle. Retirement lags completion by one cycle, so a completing
    /// instruction is still visible while its broadcast takes effect.
    fn retire(&mut self) {
        let cycle = self.cycle;
        self.reservation_station
            .retain(|inst| !(inst.complete_cycle > 0 && inst.complete_cycle < cycle));
    }

    /// Dispatch stage: tag everything sitting in the fetch buffer and move
    /// it to the back of the dispatch queue, then sample queue occupancy.
    fn dispatch_refill(&mut self) {
        for mut inst in self.fetch_buffer.drain(..) {
            inst.dispatch_cycle = self.cycle;
            inst.tag = self.next_tag;
            self.next_tag += 1;
            self.total_instructions += 1;
            self.dispatch_queue.push_back(inst);
        }

        let size = self.dispatch_queue.len();
        if size > 0 {
            self.disp_size_sum += size as u64;
            self.disp_samples += 1;
        }
        if size > self.max_disp_size {
            self.max_disp_size = size;
        }
    }

    /// Fetch stage: pull up to F records from the trace into the fetch
    /// buffer. A source that runs dry ends fetching for good.
    fn fetch(&mut self) -> Result<(), SimulatorError> {
        if self.trace_done {
            return Ok(());
        }
        for _ in 0..self.config.fetch_width {
            match self.trace.next_instruction()? {
                Some(decoded) => {
                    self.fetch_buffer
                        .push(InflightInstruction::new(&decoded, self.cycle));
                },
                None => {
                    self.trace_done = true;
                    break;
                },
            }
        }
        Ok(())
    }

    /// Aggregate statistics for the run so far. Meaningful once `step` has
    /// returned false.
    pub fn stats(&self) -> SchedulerStats {
        let cycle_count = self.cycle;
        let (avg_inst_fired, avg_inst_retired) = if cycle_count > 0 {
            (
                self.total_fired as f64 / cycle_count as f64,
                self.total_instructions as f64 / cycle_count as f64,
            )
        } else {
            (0.0, 0.0)
        };
        let avg_disp_size = if self.disp_samples > 0 {
            self.disp_size_sum as f64 / self.disp_samples as f64
        } else {
            0.0
        };

        SchedulerStats {
            retired_instruction: self.total_instructions,
            cycle_count,
            avg_inst_fired,
            avg_inst_retired,
            max_disp_size: self.max_disp_size,
            avg_disp_size,
        }
    }

    /// Formatted snapshot of the scoreboard, one section per table.
    pub fn dump_state(&self) -> String {
        let mut out = String::new();
        out.push_str("--- Reservation Station ---\n");
        for inst in &self.reservation_station {
            out.push_str(&format!(
                "  tag {:4} op {:2} dest {:4} src [{}, {}] src_tag [{}, {}] fired {} complete {}\n",
                inst.tag,
                inst.op_code,
                inst.dest_reg,
                inst.src_reg[0],
                inst.src_reg[1],
                inst.src_tag[0],
                inst.src_tag[1],
                inst.fired,
                inst.complete_cycle
            ));
        }

        out.push_str("--- Functional Units ---\n");
        for (class, table) in self.functional_units.slots.iter().enumerate() {
            out.push_str(&format!("  class {}: {:?}\n", class, table));
        }

        out.push_str("--- Register Alias Table ---\n");
        let mut entries: Vec<(&i32, &u64)> = self.rename_table.mapping.iter().collect();
        entries.sort();
        for (reg, tag) in entries {
            out.push_str(&format!("  r{} -> tag {}\n", reg, tag));
        }

        out.push_str(&format!(
            "--- Dispatch Queue: {} waiting ---\n",
            self.dispatch_queue.len()
        ));
        out
    }
}
