//! Dhrystone 2.1 synthetic integer benchmark
//!
//! The procedures follow the published benchmark one to one, but the
//! benchmark globals live in [Dhrystone] and the two heap records are two
//! slots addressed by [RecordId] instead of pointers.

use core::hint::black_box;

/// Dhrystones per second of the VAX 11/780, the 1 DMIPS reference
pub const VAX_DHRYSTONES_PER_SECOND: u64 = 1757;

/// Most runs one invocation executes, larger counts are clamped.
///
/// `Arr_2_Glob[8][7]` ends at `runs + 10` and has to fit an `i32`.
pub const MAX_RUNS: u32 = i32::MAX as u32 - 10;

const STR_LEN: usize = 31;
type Str30 = [u8; STR_LEN];

const SOME_STRING: &[u8; 30] = b"DHRYSTONE PROGRAM, SOME STRING";
const FIRST_STRING: &[u8; 30] = b"DHRYSTONE PROGRAM, 1'ST STRING";
const SECOND_STRING: &[u8; 30] = b"DHRYSTONE PROGRAM, 2'ND STRING";
const THIRD_STRING: &[u8; 30] = b"DHRYSTONE PROGRAM, 3'RD STRING";

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ident {
    Ident1,
    Ident2,
    Ident3,
    Ident4,
    Ident5,
}

/// Which of the two records a record reference points to
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordId {
    Glob,
    NextGlob,
}

impl RecordId {
    fn slot(self) -> usize {
        match self {
            RecordId::Glob => 0,
            RecordId::NextGlob => 1,
        }
    }
}

/// Record with the first variant of the benchmark's union, the only one the
/// benchmark ever stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub ptr_comp: RecordId,
    pub discr: Ident,
    pub enum_comp: Ident,
    pub int_comp: i32,
    pub str_comp: Str30,
}

impl Record {
    const fn empty() -> Self {
        Self {
            ptr_comp: RecordId::Glob,
            discr: Ident::Ident1,
            enum_comp: Ident::Ident1,
            int_comp: 0,
            str_comp: [0; STR_LEN],
        }
    }
}

/// Benchmark state after the last run, used to check the port executed
/// every statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub int_glob: i32,
    pub bool_glob: bool,
    pub ch_1_glob: u8,
    pub ch_2_glob: u8,
    pub arr_1_glob_8: i32,
    pub arr_2_glob_8_7: i32,
    pub glob: Record,
    pub next_glob: Record,
    pub int_1_loc: i32,
    pub int_2_loc: i32,
    pub int_3_loc: i32,
    pub enum_loc: Ident,
    pub str_1_loc: Str30,
    pub str_2_loc: Str30,
}

impl Outcome {
    /// Compares the final state with the reference values published with
    /// Dhrystone 2.1 for `runs` iterations, clamped to [MAX_RUNS].
    pub fn is_valid(&self, runs: u32) -> bool {
        let runs = runs.min(MAX_RUNS);
        let glob_ok = self.glob.ptr_comp == RecordId::NextGlob
            && self.glob.discr == Ident::Ident1
            && self.glob.enum_comp == Ident::Ident3
            && self.glob.int_comp == 17
            && self.glob.str_comp[..30] == SOME_STRING[..];
        let next_ok = self.next_glob.ptr_comp == RecordId::NextGlob
            && self.next_glob.discr == Ident::Ident1
            && self.next_glob.enum_comp == Ident::Ident2
            && self.next_glob.int_comp == 18
            && self.next_glob.str_comp[..30] == SOME_STRING[..];
        runs > 0
            && self.int_glob == 5
            && self.bool_glob
            && self.ch_1_glob == b'A'
            && self.ch_2_glob == b'B'
            && self.arr_1_glob_8 == 7
            && self.arr_2_glob_8_7 as i64 == runs as i64 + 10
            && glob_ok
            && next_ok
            && self.int_1_loc == 5
            && self.int_2_loc == 13
            && self.int_3_loc == 7
            && self.enum_loc == Ident::Ident2
            && self.str_1_loc[..30] == FIRST_STRING[..]
            && self.str_2_loc[..30] == SECOND_STRING[..]
    }
}

/// Benchmark score derived from a tick measurement
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub dhrystones_per_second: u32,
    /// DMIPS scaled by 1000
    pub milli_dmips: u32,
}

impl Score {
    /// `runs` iterations took `ticks` cycles of a `cpu_hz` clock.
    pub fn from_ticks(runs: u32, ticks: u32, cpu_hz: u32) -> Self {
        if ticks == 0 {
            return Self {
                dhrystones_per_second: 0,
                milli_dmips: 0,
            };
        }
        let per_second = runs as u64 * cpu_hz as u64 / ticks as u64;
        let milli_dmips = per_second * 1000 / VAX_DHRYSTONES_PER_SECOND;
        Self {
            dhrystones_per_second: u32::try_from(per_second).unwrap_or(u32::MAX),
            milli_dmips: u32::try_from(milli_dmips).unwrap_or(u32::MAX),
        }
    }
}

/// The benchmark's global state.
///
/// Holds a 50x50 array, keep one around and reuse it rather than building a
/// new one per invocation on a small stack.
pub struct Dhrystone {
    records: [Record; 2],
    ptr_glob: RecordId,
    int_glob: i32,
    bool_glob: bool,
    ch_1_glob: u8,
    ch_2_glob: u8,
    arr_1_glob: [i32; 50],
    arr_2_glob: [[i32; 50]; 50],
}

impl Default for Dhrystone {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the benchmark `runs` times on a new state.
pub fn run(runs: u32) -> Outcome {
    Dhrystone::new().run(runs)
}

impl Dhrystone {
    pub fn new() -> Self {
        let mut dhry = Self {
            records: [Record::empty(); 2],
            ptr_glob: RecordId::Glob,
            int_glob: 0,
            bool_glob: false,
            ch_1_glob: 0,
            ch_2_glob: 0,
            arr_1_glob: [0; 50],
            arr_2_glob: [[0; 50]; 50],
        };
        dhry.reset();
        dhry
    }

    /// Puts the globals back to their start-of-benchmark values in place.
    pub fn reset(&mut self) {
        self.records = [Record::empty(); 2];
        let glob = &mut self.records[RecordId::Glob.slot()];
        glob.ptr_comp = RecordId::NextGlob;
        glob.discr = Ident::Ident1;
        glob.enum_comp = Ident::Ident3;
        glob.int_comp = 40;
        copy_str(&mut glob.str_comp, SOME_STRING);

        self.ptr_glob = RecordId::Glob;
        self.int_glob = 0;
        self.bool_glob = false;
        self.ch_1_glob = 0;
        self.ch_2_glob = 0;
        self.arr_1_glob.fill(0);
        for row in self.arr_2_glob.iter_mut() {
            row.fill(0);
        }
        self.arr_2_glob[8][7] = 10;
    }

    fn rec(&self, id: RecordId) -> &Record {
        &self.records[id.slot()]
    }

    fn rec_mut(&mut self, id: RecordId) -> &mut Record {
        &mut self.records[id.slot()]
    }

    /// Main benchmark loop, starting from reset globals.
    ///
    /// `runs` above [MAX_RUNS] is clamped.
    pub fn run(&mut self, runs: u32) -> Outcome {
        self.reset();
        let runs = runs.min(MAX_RUNS);
        let mut int_1_loc: i32 = 0;
        let mut int_2_loc: i32 = 0;
        let mut int_3_loc: i32 = 0;
        let mut enum_loc = Ident::Ident1;
        let mut str_1_loc: Str30 = [0; STR_LEN];
        let mut str_2_loc: Str30 = [0; STR_LEN];
        copy_str(&mut str_1_loc, FIRST_STRING);

        for run_index in 1..=black_box(runs) {
            self.proc_5();
            self.proc_4();
            int_1_loc = 2;
            int_2_loc = 3;
            copy_str(&mut str_2_loc, SECOND_STRING);
            enum_loc = Ident::Ident2;
            self.bool_glob = !self.func_2(&str_1_loc, &str_2_loc);
            while int_1_loc < int_2_loc {
                let _ = black_box(5 * int_1_loc - int_2_loc);
                int_3_loc = proc_7(int_1_loc, int_2_loc);
                int_1_loc += 1;
            }
            self.proc_8(int_1_loc, int_3_loc);
            self.proc_1(self.ptr_glob);
            let mut ch_index = b'A';
            while ch_index <= self.ch_2_glob {
                if enum_loc == self.func_1(ch_index, b'C') {
                    enum_loc = self.proc_6(Ident::Ident1);
                    copy_str(&mut str_2_loc, THIRD_STRING);
                    int_2_loc = run_index as i32;
                    self.int_glob = run_index as i32;
                }
                ch_index += 1;
            }
            int_2_loc *= int_1_loc;
            int_1_loc = int_2_loc / int_3_loc;
            int_2_loc = 7 * (int_2_loc - int_3_loc) - int_1_loc;
            int_1_loc = self.proc_2(int_1_loc);
            let _ = black_box(&str_2_loc);
        }

        Outcome {
            int_glob: self.int_glob,
            bool_glob: self.bool_glob,
            ch_1_glob: self.ch_1_glob,
            ch_2_glob: self.ch_2_glob,
            arr_1_glob_8: self.arr_1_glob[8],
            arr_2_glob_8_7: self.arr_2_glob[8][7],
            glob: *self.rec(self.ptr_glob),
            next_glob: *self.rec(RecordId::NextGlob),
            int_1_loc: black_box(int_1_loc),
            int_2_loc: black_box(int_2_loc),
            int_3_loc: black_box(int_3_loc),
            enum_loc,
            str_1_loc,
            str_2_loc,
        }
    }

    fn proc_1(&mut self, ptr_val_par: RecordId) {
        let next_record = self.rec(ptr_val_par).ptr_comp;
        // structure assignment of *Ptr_Glob into the next record
        *self.rec_mut(next_record) = *self.rec(self.ptr_glob);
        self.rec_mut(ptr_val_par).int_comp = 5;
        let int_comp = self.rec(ptr_val_par).int_comp;
        self.rec_mut(next_record).int_comp = int_comp;
        let ptr_comp = self.rec(ptr_val_par).ptr_comp;
        self.rec_mut(next_record).ptr_comp = ptr_comp;
        let ptr_comp = self.proc_3();
        self.rec_mut(next_record).ptr_comp = ptr_comp;
        if self.rec(next_record).discr == Ident::Ident1 {
            self.rec_mut(next_record).int_comp = 6;
            let enum_comp = self.proc_6(self.rec(ptr_val_par).enum_comp);
            self.rec_mut(next_record).enum_comp = enum_comp;
            let ptr_comp = self.rec(self.ptr_glob).ptr_comp;
            self.rec_mut(next_record).ptr_comp = ptr_comp;
            let int_comp = proc_7(self.rec(next_record).int_comp, 10);
            self.rec_mut(next_record).int_comp = int_comp;
        } else {
            *self.rec_mut(ptr_val_par) = *self.rec(next_record);
        }
    }

    fn proc_2(&mut self, int_par_ref: i32) -> i32 {
        let mut int_par_ref = int_par_ref;
        let mut int_loc = int_par_ref + 10;
        let mut enum_loc = Ident::Ident2;
        loop {
            if self.ch_1_glob == b'A' {
                int_loc -= 1;
                int_par_ref = int_loc - self.int_glob;
                enum_loc = Ident::Ident1;
            }
            if enum_loc == Ident::Ident1 {
                break;
            }
        }
        int_par_ref
    }

    /// Returns the new value of the caller's record reference.
    fn proc_3(&mut self) -> RecordId {
        let ptr_glob = self.ptr_glob;
        let ptr_ref_par = self.rec(ptr_glob).ptr_comp;
        let int_comp = proc_7(10, self.int_glob);
        self.rec_mut(ptr_glob).int_comp = int_comp;
        ptr_ref_par
    }

    fn proc_4(&mut self) {
        let bool_loc = self.ch_1_glob == b'A';
        self.bool_glob |= bool_loc;
        self.ch_2_glob = b'B';
    }

    fn proc_5(&mut self) {
        self.ch_1_glob = b'A';
        self.bool_glob = false;
    }

    fn proc_6(&self, enum_val_par: Ident) -> Ident {
        let mut enum_ref_par = enum_val_par;
        if !func_3(enum_val_par) {
            enum_ref_par = Ident::Ident4;
        }
        match enum_val_par {
            Ident::Ident1 => enum_ref_par = Ident::Ident1,
            Ident::Ident2 => {
                enum_ref_par = if self.int_glob > 100 {
                    Ident::Ident1
                } else {
                    Ident::Ident4
                }
            }
            Ident::Ident3 => enum_ref_par = Ident::Ident2,
            Ident::Ident4 => {}
            Ident::Ident5 => enum_ref_par = Ident::Ident3,
        }
        enum_ref_par
    }

    fn proc_8(&mut self, int_1_par_val: i32, int_2_par_val: i32) {
        let int_loc = (int_1_par_val + 5) as usize;
        self.arr_1_glob[int_loc] = int_2_par_val;
        self.arr_1_glob[int_loc + 1] = self.arr_1_glob[int_loc];
        self.arr_1_glob[int_loc + 30] = int_loc as i32;
        for int_index in int_loc..=int_loc + 1 {
            self.arr_2_glob[int_loc][int_index] = int_loc as i32;
        }
        self.arr_2_glob[int_loc][int_loc - 1] += 1;
        self.arr_2_glob[int_loc + 20][int_loc] = self.arr_1_glob[int_loc];
        self.int_glob = 5;
    }

    fn func_1(&mut self, ch_1_par_val: u8, ch_2_par_val: u8) -> Ident {
        let ch_1_loc = ch_1_par_val;
        let ch_2_loc = ch_1_loc;
        if ch_2_loc != ch_2_par_val {
            Ident::Ident1
        } else {
            self.ch_1_glob = ch_1_loc;
            Ident::Ident2
        }
    }

    fn func_2(&mut self, str_1_par_ref: &Str30, str_2_par_ref: &Str30) -> bool {
        let mut int_loc = 2;
        let mut ch_loc = 0;
        while int_loc <= 2 {
            if self.func_1(str_1_par_ref[int_loc], str_2_par_ref[int_loc + 1]) == Ident::Ident1 {
                ch_loc = b'A';
                int_loc += 1;
            }
        }
        if (b'W'..b'Z').contains(&ch_loc) {
            int_loc = 7;
        }
        if ch_loc == b'R' {
            true
        } else if str_1_par_ref > str_2_par_ref {
            int_loc += 7;
            self.int_glob = int_loc as i32;
            true
        } else {
            false
        }
    }
}

fn proc_7(int_1_par_val: i32, int_2_par_val: i32) -> i32 {
    let int_loc = int_1_par_val + 2;
    int_2_par_val + int_loc
}

fn func_3(enum_par_val: Ident) -> bool {
    let enum_loc = enum_par_val;
    enum_loc == Ident::Ident3
}

fn copy_str(dst: &mut Str30, src: &[u8; 30]) {
    dst[..30].copy_from_slice(black_box(src));
    dst[30] = 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values_single_run() {
        let outcome = run(1);
        assert_eq!(outcome.int_glob, 5);
        assert!(outcome.bool_glob);
        assert_eq!(outcome.ch_1_glob, b'A');
        assert_eq!(outcome.ch_2_glob, b'B');
        assert_eq!(outcome.arr_1_glob_8, 7);
        assert_eq!(outcome.arr_2_glob_8_7, 11);
        assert_eq!(outcome.glob.enum_comp, Ident::Ident3);
        assert_eq!(outcome.glob.int_comp, 17);
        assert_eq!(outcome.next_glob.enum_comp, Ident::Ident2);
        assert_eq!(outcome.next_glob.int_comp, 18);
        assert_eq!(outcome.int_1_loc, 5);
        assert_eq!(outcome.int_2_loc, 13);
        assert_eq!(outcome.int_3_loc, 7);
        assert!(outcome.is_valid(1));
    }

    #[test]
    fn test_many_runs_valid() {
        let outcome = run(1000);
        assert_eq!(outcome.arr_2_glob_8_7, 1010);
        assert!(outcome.is_valid(1000));
        assert!(!outcome.is_valid(999));
    }

    #[test]
    fn test_zero_runs_is_not_valid() {
        assert!(!run(0).is_valid(0));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(run(50), run(50));
    }

    #[test]
    fn test_reused_state_matches_fresh_state() {
        let mut dhry = Dhrystone::new();
        for runs in [1, 100, 7, 1000] {
            let outcome = dhry.run(runs);
            assert_eq!(outcome, run(runs));
            assert!(outcome.is_valid(runs));
        }
    }

    #[test]
    fn test_run_count_clamped_to_max() {
        let mut outcome = run(1);
        outcome.arr_2_glob_8_7 = i32::MAX;
        assert!(outcome.is_valid(MAX_RUNS));
        assert!(outcome.is_valid(u32::MAX));
        assert!(!outcome.is_valid(MAX_RUNS - 1));
        assert_eq!(MAX_RUNS as i64 + 10, i32::MAX as i64);
    }

    #[test]
    fn test_score() {
        // 10k runs in 24M cycles at 48MHz = half a second
        let score = Score::from_ticks(10_000, 24_000_000, 48_000_000);
        assert_eq!(score.dhrystones_per_second, 20_000);
        assert_eq!(score.milli_dmips, 11_383);
        assert_eq!(
            Score::from_ticks(10, 0, 48_000_000),
            Score {
                dhrystones_per_second: 0,
                milli_dmips: 0
            }
        );
    }

    #[test]
    fn test_proc_6_mapping() {
        let mut dhry = Dhrystone::new();
        assert_eq!(dhry.proc_6(Ident::Ident1), Ident::Ident1);
        assert_eq!(dhry.proc_6(Ident::Ident2), Ident::Ident4);
        dhry.int_glob = 101;
        assert_eq!(dhry.proc_6(Ident::Ident2), Ident::Ident1);
        assert_eq!(dhry.proc_6(Ident::Ident3), Ident::Ident2);
        assert_eq!(dhry.proc_6(Ident::Ident4), Ident::Ident4);
        assert_eq!(dhry.proc_6(Ident::Ident5), Ident::Ident3);
    }
}
