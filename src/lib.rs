//! # 6502 CPU Core
//!
//! A cycle-counted NMOS 6502 CPU core designed to be embedded in a machine
//! emulator.
//!
//! The crate provides the CPU state machine, a trait-based memory bus
//! abstraction, a table-driven opcode metadata system and a small
//! disassembler used for tracing.
//!
//! ## Quick Start
//!
//! ```rust
//! use cpu6502::{CPU, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//! memory.write(0x8000, 0xA9); // LDA #$42
//! memory.write(0x8001, 0x42);
//!
//! // Initialize CPU - it will load PC from the reset vector
//! let mut cpu = CPU::new(memory);
//! assert_eq!(cpu.pc(), 0x8000);
//!
//! cpu.step().unwrap();
//! assert_eq!(cpu.a(), 0x42);
//! assert_eq!(cpu.cycles(), 2);
//! ```
//!
//! ## Architecture
//!
//! - **Modularity**: CPU state is separated from memory via the `MemoryBus` trait
//! - **Cycle counting**: every step advances a monotonic cycle counter by the
//!   documented cost, including page-crossing and branch penalties
//! - **Table-driven design**: all opcode metadata lives in `OPCODE_TABLE`
//! - **Interrupt lines**: RESET, NMI and IRQ are modelled as lines the driver
//!   (or the bus) asserts; `step()` services them in hardware priority order
//!
//! ## Modules
//!
//! - `cpu` - CPU state and execution logic
//! - `flags` - Packed processor status register
//! - `memory` - MemoryBus trait and FlatMemory
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing mode enumeration
//! - `disassembler` - Instruction decoding and formatting for traces

pub mod addressing;
pub mod cpu;
pub mod disassembler;
pub mod flags;
pub mod memory;
pub mod opcodes;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::CPU;
pub use flags::StatusFlags;
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{OpcodeMetadata, OPCODE_TABLE};

use thiserror::Error;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The byte at PC is not one of the 151 documented opcodes.
    ///
    /// Fatal to the instruction stream: PC is left pointing at the opcode.
    #[error("invalid opcode ${0:02X}")]
    InvalidOpcode(u8),
}
