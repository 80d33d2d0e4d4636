//! Fuzz target for the disassembler.
//!
//! Arbitrary byte sequences must disassemble without panicking, with every
//! input byte accounted for exactly once.

#![no_main]

use arbitrary::Arbitrary;
use cpu6502::disassembler::{disassemble, format_listing, DisassemblyOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    start_address: u16,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    let options = DisassemblyOptions {
        start_address: input.start_address,
    };
    let instructions = disassemble(&input.bytes, options);

    let mut total_size: usize = 0;
    let mut expected_address = input.start_address;

    for instr in &instructions {
        assert_eq!(instr.address, expected_address);
        assert!((1..=3).contains(&instr.size_bytes));
        assert!(instr.operand_bytes.len() < instr.size_bytes as usize);
        assert!(!format_listing(instr).is_empty());

        total_size += instr.size_bytes as usize;
        expected_address = expected_address.wrapping_add(instr.size_bytes as u16);
    }

    assert_eq!(total_size, input.bytes.len());
});
