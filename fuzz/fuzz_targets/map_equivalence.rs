#![no_main]

use llrb_tree::model::{run_map_equivalence, MapOp};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|ops: Vec<MapOp>| {
    run_map_equivalence(ops);
});
