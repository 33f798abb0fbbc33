#![allow(dead_code)]

use crate::bus::{new_shared_bus, Bus};
use crate::constants::StatusFlag;
use crate::cpu::Cpu;

pub const P: u8 = crate::constants::RESET_STATUS_FLAG;
pub const C: u8 = StatusFlag::Carry as u8;
pub const Z: u8 = StatusFlag::Zero as u8;
pub const I: u8 = StatusFlag::InterruptDisable as u8;
pub const D: u8 = StatusFlag::Decimal as u8;
pub const B: u8 = StatusFlag::Break as u8;
pub const U: u8 = StatusFlag::Unused as u8;
pub const V: u8 = StatusFlag::Overflow as u8;
pub const N: u8 = StatusFlag::Negative as u8;

/// A flat, unmapped 64KiB RAM, loaded with a program at `0x0200` and a reset
/// vector pointing at it.
pub struct RamBus {
    memory: [u8; 0x10000],
}

const PROGRAM_START: u16 = 0x0200;

impl RamBus {
    pub fn with_program(program: &[u8]) -> Self {
        let mut memory = [0u8; 0x10000];
        memory[PROGRAM_START as usize..PROGRAM_START as usize + program.len()]
            .copy_from_slice(program);
        memory[0xFFFC] = PROGRAM_START as u8;
        memory[0xFFFD] = (PROGRAM_START >> 8) as u8;
        RamBus { memory }
    }

    pub fn poke(&mut self, address: u16, value: u8) {
        self.memory[address as usize] = value;
    }
}

impl Bus for RamBus {
    fn read(&mut self, address: u16) -> u8 {
        self.memory[address as usize]
    }
    fn write(&mut self, address: u16, value: u8) {
        self.memory[address as usize] = value;
    }
}

/// Build a CPU over a fresh `RamBus` loaded with `program` at `0x0200`,
/// apply `setup` to seed extra bytes, and leave it reset and ready to step.
pub fn new_cpu(program: &[u8], setup: impl FnOnce(&mut RamBus)) -> Cpu {
    let mut ram = RamBus::with_program(program);
    setup(&mut ram);
    let mut cpu = Cpu::new(new_shared_bus(ram));
    cpu.reset();
    cpu
}

/// Build a CPU and run it until an illegal opcode (`0x02`, reserved by
/// convention in these tests to mean "halt") is decoded, or `max_steps`.
pub fn run_program(program: &[u8], setup: impl FnOnce(&mut RamBus)) -> Cpu {
    let mut cpu = new_cpu(program, setup);
    cpu.max_steps = Some(10_000);
    cpu.run_until(|cpu| cpu.current_instruction.op == crate::opcodes::Operation::Err);
    cpu
}

pub fn assert_status(cpu: &Cpu, expected: u8) {
    assert_eq!(
        cpu.p, expected,
        "expected status 0b{:08b} but got 0b{:08b}",
        expected, cpu.p
    );
}

pub fn assert_register_a(program: &[u8], setup: impl FnOnce(&mut RamBus), a: u8, status: u8) {
    let cpu = run_program(program, setup);
    assert_eq!(cpu.a, a, "expected A={:#04x} but got {:#04x}", a, cpu.a);
    assert_status(&cpu, status);
}
