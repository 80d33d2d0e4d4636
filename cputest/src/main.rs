//! cputest - run a raw 6502 test image with a memory-mapped console.
//!
//! The image is copied into a flat 64 KiB memory at `--load-offset` and the
//! CPU is reset into $0400. Programs talk to the terminal through two
//! addresses:
//!
//! - a read of $F004 returns the next byte of standard input; EOF, Ctrl-C,
//!   Escape, `q` and `Q` stop the run
//! - a write to $F001 prints the byte on standard output
//!
//! Both addresses still behave as RAM otherwise.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cpu6502::disassembler::{disassemble_at, format_listing, format_registers};
use cpu6502::{ExecutionError, MemoryBus, CPU};
use log::{debug, info, warn};
use thiserror::Error;

const CONSOLE_IN: u16 = 0xF004;
const CONSOLE_OUT: u16 = 0xF001;
const ENTRY_POINT: u16 = 0x0400;
const MEMORY_SIZE: usize = 0x10000;

/// Clock rate used to report elapsed machine time.
const CLOCK_HZ: f64 = 2_000_000.0;

/// Run a raw 6502 test image
#[derive(Parser, Debug)]
#[command(name = "cputest")]
#[command(about = "Runs a raw 6502 test image with a memory-mapped console", long_about = None)]
struct Args {
    /// Print registers and the disassembled instruction before every step
    #[arg(long)]
    trace: bool,

    /// Stop after this many CPU cycles
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Address the first byte of the image is loaded at
    #[arg(long, default_value_t = 10)]
    load_offset: usize,

    /// Raw binary image file
    image: PathBuf,
}

#[derive(Debug, Error)]
enum HarnessError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("image file too large: {size} bytes at offset {offset}")]
    ImageTooLarge { size: usize, offset: usize },
}

/// Flat 64 KiB memory with the console mapped in.
struct ConsoleBus<R, W> {
    memory: Box<[u8; MEMORY_SIZE]>,
    input: R,
    output: W,
    stop: bool,
}

impl<R: Read, W: Write> ConsoleBus<R, W> {
    fn new(image: &[u8], offset: usize, input: R, output: W) -> Result<Self, HarnessError> {
        let end = offset
            .checked_add(image.len())
            .filter(|&end| end <= MEMORY_SIZE)
            .ok_or(HarnessError::ImageTooLarge {
                size: image.len(),
                offset,
            })?;

        let mut memory = Box::new([0u8; MEMORY_SIZE]);
        memory[offset..end].copy_from_slice(image);
        let [lo, hi] = ENTRY_POINT.to_le_bytes();
        memory[0xFFFC] = lo;
        memory[0xFFFD] = hi;

        Ok(Self {
            memory,
            input,
            output,
            stop: false,
        })
    }

    fn next_input(&mut self) -> u8 {
        let mut byte = [0u8; 1];
        match self.input.read(&mut byte) {
            Ok(1) => {
                if matches!(byte[0], 3 | 27 | b'q' | b'Q') {
                    self.stop = true;
                }
                byte[0]
            }
            Ok(_) => {
                debug!("console input closed");
                self.stop = true;
                0
            }
            Err(e) => {
                warn!("console input failed: {}", e);
                self.stop = true;
                0
            }
        }
    }
}

impl<R: Read, W: Write> MemoryBus for ConsoleBus<R, W> {
    fn read(&mut self, addr: u16) -> u8 {
        if addr == CONSOLE_IN {
            return self.next_input();
        }
        self.memory[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        if addr == CONSOLE_OUT {
            if let Err(e) = self.output.write_all(&[value]).and_then(|_| self.output.flush()) {
                warn!("console output failed: {}", e);
            }
        }
        self.memory[addr as usize] = value;
    }

    fn peek(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }
}

/// Steps the CPU until the console requests a stop or the cycle budget runs
/// out.
fn run<R: Read, W: Write>(
    cpu: &mut CPU<ConsoleBus<R, W>>,
    trace: bool,
    max_cycles: Option<u64>,
) -> Result<(), ExecutionError> {
    cpu.reset();

    while !cpu.memory().stop {
        if max_cycles.is_some_and(|max| cpu.cycles() >= max) {
            info!("cycle budget of {} reached", cpu.cycles());
            break;
        }
        if trace {
            let instruction = disassemble_at(cpu.memory(), cpu.pc());
            println!("{} {}", format_registers(cpu), format_listing(&instruction));
        }
        cpu.step()?;
    }
    Ok(())
}

fn load(args: &Args) -> Result<CPU<ConsoleBus<io::Stdin, io::Stdout>>, HarnessError> {
    let image = fs::read(&args.image).map_err(|source| HarnessError::Io {
        path: args.image.clone(),
        source,
    })?;
    info!(
        "loaded {} bytes from {} at {:04X}",
        image.len(),
        args.image.display(),
        args.load_offset
    );

    let bus = ConsoleBus::new(&image, args.load_offset, io::stdin(), io::stdout())?;
    Ok(CPU::new(bus))
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut cpu = match load(&args) {
        Ok(cpu) => cpu,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(&mut cpu, args.trace, args.max_cycles) {
        eprintln!("{} at {:04X}", e, cpu.pc());
        return ExitCode::FAILURE;
    }

    let cycles = cpu.cycles();
    println!("{} CPU cycles, {} s", cycles, cycles as f64 / CLOCK_HZ);
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harness<'a>(program: &[u8], input: &'a [u8]) -> CPU<ConsoleBus<&'a [u8], Vec<u8>>> {
        let mut image = vec![0u8; ENTRY_POINT as usize - 10];
        image.extend_from_slice(program);
        let bus = ConsoleBus::new(&image, 10, input, Vec::new()).unwrap();
        CPU::new(bus)
    }

    #[test]
    fn test_image_is_loaded_at_offset() {
        let bus = ConsoleBus::new(&[0xAA, 0xBB], 10, io::empty(), io::sink()).unwrap();
        assert_eq!(bus.peek(0x000A), 0xAA);
        assert_eq!(bus.peek(0x000B), 0xBB);
        assert_eq!(bus.peek(0xFFFC), 0x00);
        assert_eq!(bus.peek(0xFFFD), 0x04);
    }

    #[test]
    fn test_oversized_image_is_rejected() {
        let image = vec![0u8; MEMORY_SIZE - 9];
        assert!(matches!(
            ConsoleBus::new(&image, 10, io::empty(), io::sink()),
            Err(HarnessError::ImageTooLarge { offset: 10, .. })
        ));
        assert!(ConsoleBus::new(&image[1..], 10, io::empty(), io::sink()).is_ok());
    }

    #[test]
    fn test_echo_until_quit() {
        let program = [
            0xAD, 0x04, 0xF0, // 0400: LDA $F004
            0x8D, 0x01, 0xF0, // 0403: STA $F001
            0x4C, 0x00, 0x04, // 0406: JMP $0400
        ];
        let mut cpu = harness(&program, b"hi!q");

        run(&mut cpu, false, Some(10_000)).unwrap();

        assert_eq!(cpu.memory().output, b"hi!".to_vec());
        assert!(cpu.memory().stop);
        assert_eq!(cpu.pc(), 0x0403);
    }

    #[test]
    fn test_eof_stops_the_run() {
        let program = [0xAD, 0x04, 0xF0, 0x4C, 0x00, 0x04];
        let mut cpu = harness(&program, b"");

        run(&mut cpu, false, Some(10_000)).unwrap();
        assert!(cpu.memory().stop);
        assert_eq!(cpu.cycles(), 4);
    }

    #[test]
    fn test_cycle_budget_stops_the_run() {
        let program = [0x4C, 0x00, 0x04]; // JMP $0400
        let mut cpu = harness(&program, b"");

        run(&mut cpu, false, Some(30)).unwrap();
        assert_eq!(cpu.cycles(), 30);
        assert!(!cpu.memory().stop);
    }

    #[test]
    fn test_invalid_opcode_is_reported() {
        let program = [0xEA, 0xFF];
        let mut cpu = harness(&program, b"");

        assert_eq!(
            run(&mut cpu, false, None),
            Err(ExecutionError::InvalidOpcode(0xFF))
        );
        assert_eq!(cpu.pc(), 0x0401);
    }
}
