//! Renders a decoded instruction stream as text mnemonics.
//!
//! The per-mode operand formats mirror the original disassembler's
//! `arg_format` table directly: immediate is `#$nn`, zero page `$nn`, and so
//! on through the indexed and indirect forms.

use crate::bus::Bus;
use crate::decoder::decode;
use crate::opcodes::{Mode, Operation};

/// One disassembled line: the address it started at, the raw bytes it
/// consumed, and the rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassembledLine {
    pub address: u16,
    pub bytes: Vec<u8>,
    pub text: String,
}

/// Disassemble `count` instructions starting at `start`, reading bytes
/// through `bus`. Does not mutate CPU state; only issues `read`s.
pub fn disassemble(bus: &mut dyn Bus, start: u16, count: usize) -> Vec<DisassembledLine> {
    let mut lines = Vec::with_capacity(count);
    let mut address = start;
    for _ in 0..count {
        let line = disassemble_one(bus, address);
        address = address.wrapping_add(line.bytes.len() as u16);
        lines.push(line);
    }
    lines
}

/// Disassemble a single instruction at `address`, returning the rendered
/// line and its byte length so callers can advance.
pub fn disassemble_one(bus: &mut dyn Bus, address: u16) -> DisassembledLine {
    let opcode = bus.read(address);
    let inst = decode(opcode);
    let mut bytes = vec![opcode];

    if inst.op == Operation::Err {
        return DisassembledLine {
            address,
            bytes,
            text: format!("<invalid opcode ${:02X}>", opcode),
        };
    }

    let operand_len = inst.mode.operand_length();
    let operand = match operand_len {
        0 => None,
        1 => {
            let b = bus.read(address.wrapping_add(1));
            bytes.push(b);
            Some(b as u16)
        }
        2 => {
            let lo = bus.read(address.wrapping_add(1));
            let hi = bus.read(address.wrapping_add(2));
            bytes.push(lo);
            bytes.push(hi);
            Some(((hi as u16) << 8) | lo as u16)
        }
        _ => unreachable!(),
    };

    let text = match (inst.mode, operand) {
        (Mode::Implied, _) | (Mode::Accumulator, _) => inst.op.mnemonic().to_string(),
        (Mode::Immediate, Some(v)) => format!("{} #${:02X}", inst.op.mnemonic(), v),
        (Mode::ZeroPage, Some(v)) => format!("{} ${:02X}", inst.op.mnemonic(), v),
        (Mode::ZeroPageX, Some(v)) => format!("{} ${:02X},X", inst.op.mnemonic(), v),
        (Mode::ZeroPageY, Some(v)) => format!("{} ${:02X},Y", inst.op.mnemonic(), v),
        (Mode::Relative, Some(v)) => {
            let target = address.wrapping_add(2).wrapping_add((v as u8) as i8 as u16);
            format!("{} ${:04X}", inst.op.mnemonic(), target)
        }
        (Mode::Absolute, Some(v)) => format!("{} ${:04X}", inst.op.mnemonic(), v),
        (Mode::AbsoluteX, Some(v)) => format!("{} ${:04X},X", inst.op.mnemonic(), v),
        (Mode::AbsoluteY, Some(v)) => format!("{} ${:04X},Y", inst.op.mnemonic(), v),
        (Mode::Indirect, Some(v)) => format!("{} (${:04X})", inst.op.mnemonic(), v),
        (Mode::IndirectX, Some(v)) => format!("{} (${:02X},X)", inst.op.mnemonic(), v),
        (Mode::IndirectY, Some(v)) => format!("{} (${:02X}),Y", inst.op.mnemonic(), v),
        (_, None) => inst.op.mnemonic().to_string(),
    };

    DisassembledLine {
        address,
        bytes,
        text,
    }
}
