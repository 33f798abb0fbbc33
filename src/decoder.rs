//! Pure opcode decoding: `decode(byte) -> Instruction`.
//!
//! Two tiers, following the structure of the ISA itself rather than a flat
//! 256-entry table: a handful of single-byte, mostly-implied opcodes are
//! looked up directly, and everything else falls out of the `aaabbbcc` bit
//! decomposition shared by the three instruction groups.

use crate::opcodes::{Instruction, Mode, Operation};

const GROUP1_OPS: [Operation; 8] = [
    Operation::Ora,
    Operation::And,
    Operation::Eor,
    Operation::Adc,
    Operation::Sta,
    Operation::Lda,
    Operation::Cmp,
    Operation::Sbc,
];

const GROUP2_OPS: [Operation; 8] = [
    Operation::Asl,
    Operation::Rol,
    Operation::Lsr,
    Operation::Ror,
    Operation::Stx,
    Operation::Ldx,
    Operation::Dec,
    Operation::Inc,
];

// Index 0 has no meaning in this group; it is never reached because `op == 0`
// is rejected before the lookup.
const GROUP3_OPS: [Operation; 8] = [
    Operation::Err,
    Operation::Bit,
    Operation::Jmp,
    Operation::Jmp,
    Operation::Sty,
    Operation::Ldy,
    Operation::Cpy,
    Operation::Cpx,
];

const GROUP1_MODES: [Mode; 8] = [
    Mode::IndirectX,
    Mode::ZeroPage,
    Mode::Immediate,
    Mode::Absolute,
    Mode::IndirectY,
    Mode::ZeroPageX,
    Mode::AbsoluteY,
    Mode::AbsoluteX,
];

/// Shared by groups 2 and 3. Indices 4 and 6 have no meaning in this table
/// and are rejected by the caller before lookup.
const GROUP23_MODES: [Mode; 8] = [
    Mode::Immediate,
    Mode::ZeroPage,
    Mode::Accumulator,
    Mode::Absolute,
    Mode::Implied, // unused (index 4)
    Mode::ZeroPageX,
    Mode::Implied, // unused (index 6)
    Mode::AbsoluteX,
];

/// Decode an opcode byte into the operation/addressing-mode pair it invokes.
/// Total: every possible byte maps to a valid `Instruction`, with `Err` used
/// for opcodes that have no documented meaning.
pub fn decode(opcode: u8) -> Instruction {
    if let Some(inst) = decode_tier1(opcode) {
        return inst;
    }
    decode_tier2(opcode)
}

fn decode_tier1(opcode: u8) -> Option<Instruction> {
    use Mode::*;
    use Operation::*;
    let inst = match opcode {
        0x00 => Instruction::new(Brk, Implied),
        0x08 => Instruction::new(Php, Implied),
        0x18 => Instruction::new(Clc, Implied),
        0x20 => Instruction::new(Jsr, Absolute),
        0x28 => Instruction::new(Plp, Implied),
        0x38 => Instruction::new(Sec, Implied),
        0x40 => Instruction::new(Rti, Implied),
        0x48 => Instruction::new(Pha, Implied),
        0x58 => Instruction::new(Cli, Implied),
        0x60 => Instruction::new(Rts, Implied),
        0x68 => Instruction::new(Pla, Implied),
        0x78 => Instruction::new(Sei, Implied),
        0x88 => Instruction::new(Dey, Implied),
        0x8A => Instruction::new(Txa, Implied),
        0x98 => Instruction::new(Tya, Implied),
        0x9A => Instruction::new(Txs, Implied),
        0xA8 => Instruction::new(Tay, Implied),
        0xAA => Instruction::new(Tax, Implied),
        0xB8 => Instruction::new(Clv, Implied),
        0xBA => Instruction::new(Tsx, Implied),
        0xC8 => Instruction::new(Iny, Implied),
        0xCA => Instruction::new(Dex, Implied),
        0xD8 => Instruction::new(Cld, Implied),
        0xE8 => Instruction::new(Inx, Implied),
        0xEA => Instruction::new(Nop, Implied),
        0xF8 => Instruction::new(Sed, Implied),
        _ => return None,
    };
    Some(inst)
}

fn decode_tier2(opcode: u8) -> Instruction {
    let op_bits = (opcode & 0xE0) >> 5;
    let mode_bits = (opcode & 0x1C) >> 2;
    let group = opcode & 0x03;

    match group {
        1 => decode_group1(op_bits, mode_bits),
        2 => decode_group2(op_bits, mode_bits),
        0 => decode_group3(opcode, op_bits, mode_bits),
        _ => Instruction::ERR,
    }
}

fn decode_group1(op_bits: u8, mode_bits: u8) -> Instruction {
    let op = GROUP1_OPS[op_bits as usize];
    let mode = GROUP1_MODES[mode_bits as usize];
    if op == Operation::Sta && mode == Mode::Immediate {
        return Instruction::ERR;
    }
    Instruction::new(op, mode)
}

fn decode_group2(op_bits: u8, mode_bits: u8) -> Instruction {
    if mode_bits == 4 || mode_bits == 6 {
        return Instruction::ERR;
    }
    let op = GROUP2_OPS[op_bits as usize];
    let mut mode = GROUP23_MODES[mode_bits as usize];
    if op != Operation::Ldx && mode == Mode::Immediate {
        return Instruction::ERR;
    }
    match op {
        Operation::Stx => {
            if mode == Mode::AbsoluteX {
                return Instruction::ERR;
            }
            if mode == Mode::ZeroPageX {
                mode = Mode::ZeroPageY;
            }
        }
        Operation::Ldx => {
            if mode == Mode::ZeroPageX {
                mode = Mode::ZeroPageY;
            } else if mode == Mode::AbsoluteX {
                mode = Mode::AbsoluteY;
            }
        }
        _ => {}
    }
    Instruction::new(op, mode)
}

fn decode_group3(opcode: u8, op_bits: u8, mode_bits: u8) -> Instruction {
    use Operation::*;

    if mode_bits == 4 {
        // Branches: xxy10000. xx selects the flag, y selects the polarity.
        let flag = (op_bits & 0x6) >> 1;
        let set = (op_bits & 0x1) != 0;
        let op = match flag {
            0 => {
                if set {
                    Bmi
                } else {
                    Bpl
                }
            }
            1 => {
                if set {
                    Bvs
                } else {
                    Bvc
                }
            }
            2 => {
                if set {
                    Bcs
                } else {
                    Bcc
                }
            }
            _ => {
                if set {
                    Beq
                } else {
                    Bne
                }
            }
        };
        return Instruction::new(op, Mode::Relative);
    }

    if op_bits == 0 || mode_bits == 2 || mode_bits == 6 {
        return Instruction::ERR;
    }
    let op = GROUP3_OPS[op_bits as usize];
    let mode = GROUP23_MODES[mode_bits as usize];

    match op {
        Bit => {
            if mode != Mode::ZeroPage && mode != Mode::Absolute {
                return Instruction::ERR;
            }
        }
        Jmp => {
            if mode != Mode::Absolute {
                return Instruction::ERR;
            }
            if opcode == 0x6C {
                return Instruction::new(Jmp, Mode::Indirect);
            }
        }
        Sty => {
            if mode == Mode::Immediate || mode == Mode::AbsoluteX {
                return Instruction::ERR;
            }
        }
        Cpy | Cpx => {
            if mode == Mode::ZeroPageX || mode == Mode::AbsoluteX {
                return Instruction::ERR;
            }
        }
        _ => {}
    }
    Instruction::new(op, mode)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::opcodes::{Mode::*, Operation::*};

    #[test]
    fn tier1_opcodes() {
        assert_eq!(decode(0x00), Instruction::new(Brk, Implied));
        assert_eq!(decode(0x20), Instruction::new(Jsr, Absolute));
        assert_eq!(decode(0xEA), Instruction::new(Nop, Implied));
    }

    #[test]
    fn group1_addressing_modes() {
        assert_eq!(decode(0x01), Instruction::new(Ora, IndirectX));
        assert_eq!(decode(0xA9), Instruction::new(Lda, Immediate));
        assert_eq!(decode(0x6D), Instruction::new(Adc, Absolute));
        assert_eq!(decode(0x81), Instruction::new(Sta, IndirectX));
    }

    #[test]
    fn sta_immediate_is_illegal() {
        // 0x89 has group=1, op bits select STA, mode bits select Immediate.
        assert_eq!(decode(0x89), Instruction::ERR);
    }

    #[test]
    fn ldx_indexes_by_y_not_x() {
        assert_eq!(decode(0xB6), Instruction::new(Ldx, ZeroPageY));
        assert_eq!(decode(0xBE), Instruction::new(Ldx, AbsoluteY));
    }

    #[test]
    fn stx_absolute_x_is_illegal() {
        assert_eq!(decode(0x9E), Instruction::ERR);
    }

    #[test]
    fn stx_indexes_by_y() {
        assert_eq!(decode(0x96), Instruction::new(Stx, ZeroPageY));
    }

    #[test]
    fn branches() {
        assert_eq!(decode(0x10), Instruction::new(Bpl, Relative));
        assert_eq!(decode(0x30), Instruction::new(Bmi, Relative));
        assert_eq!(decode(0x50), Instruction::new(Bvc, Relative));
        assert_eq!(decode(0x70), Instruction::new(Bvs, Relative));
        assert_eq!(decode(0x90), Instruction::new(Bcc, Relative));
        assert_eq!(decode(0xB0), Instruction::new(Bcs, Relative));
        assert_eq!(decode(0xD0), Instruction::new(Bne, Relative));
        assert_eq!(decode(0xF0), Instruction::new(Beq, Relative));
    }

    #[test]
    fn jmp_absolute_vs_indirect() {
        assert_eq!(decode(0x4C), Instruction::new(Jmp, Absolute));
        assert_eq!(decode(0x6C), Instruction::new(Jmp, Indirect));
    }

    #[test]
    fn bit_only_zeropage_and_absolute() {
        assert_eq!(decode(0x24), Instruction::new(Bit, ZeroPage));
        assert_eq!(decode(0x2C), Instruction::new(Bit, Absolute));
    }

    #[test]
    fn sty_restrictions() {
        assert_eq!(decode(0x94), Instruction::new(Sty, ZeroPageX));
        // STY has no immediate or absolute,X encoding in the group-3 table.
        assert_eq!(decode(0x8C), Instruction::new(Sty, Absolute));
    }

    #[test]
    fn group_three_undocumented_is_err() {
        assert_eq!(decode(0x03), Instruction::ERR);
        assert_eq!(decode(0xFF), Instruction::ERR);
    }

    #[test]
    fn decode_is_total() {
        for opcode in 0u8..=255u8 {
            // Must not panic for any input.
            let _ = decode(opcode);
        }
    }
}
