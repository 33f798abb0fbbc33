//! Control flow: jumps, branches, the stack frame for BRK/RTI, and the
//! single-bit flag instructions.

use super::Cpu;
use crate::constants::{InterruptVector, StatusFlag};
use crate::opcodes::{Instruction, Operation};

impl Cpu {
    pub(crate) fn ops_jump(&mut self, inst: Instruction) {
        use Operation::*;
        match inst.op {
            Jmp => {
                self.pc = self.operand_address(inst.mode);
            }
            Jsr => {
                let target = self.operand_address(inst.mode);
                // Classic 6502 quirk: the return address pushed is the
                // address of JSR's own last byte, not the next instruction.
                let return_to = self.pc.wrapping_sub(1);
                self.push_u16(return_to);
                self.pc = target;
            }
            Rts => {
                let address = self.pull_u16();
                self.pc = address.wrapping_add(1);
            }
            Beq => self.branch(inst, self.is_flag_set(StatusFlag::Zero)),
            Bne => self.branch(inst, !self.is_flag_set(StatusFlag::Zero)),
            Bcs => self.branch(inst, self.is_flag_set(StatusFlag::Carry)),
            Bcc => self.branch(inst, !self.is_flag_set(StatusFlag::Carry)),
            Bmi => self.branch(inst, self.is_flag_set(StatusFlag::Negative)),
            Bpl => self.branch(inst, !self.is_flag_set(StatusFlag::Negative)),
            Bvs => self.branch(inst, self.is_flag_set(StatusFlag::Overflow)),
            Bvc => self.branch(inst, !self.is_flag_set(StatusFlag::Overflow)),
            Sec => self.set_flag(StatusFlag::Carry, true),
            Sei => self.set_flag(StatusFlag::InterruptDisable, true),
            Sed => self.set_flag(StatusFlag::Decimal, true),
            Clc => self.set_flag(StatusFlag::Carry, false),
            Cli => self.set_flag(StatusFlag::InterruptDisable, false),
            Cld => self.set_flag(StatusFlag::Decimal, false),
            Clv => self.set_flag(StatusFlag::Overflow, false),
            Brk => self.brk(),
            Nop | Err => {
                // ERR decodes any opcode with no documented meaning; it is
                // executed as a harmless one-byte no-op, same as NOP.
            }
            Rti => {
                let status = self.pull_u8();
                self.p = (status & !(StatusFlag::Break as u8)) | StatusFlag::Unused as u8;
                self.pc = self.pull_u16();
            }
            _ => unreachable!("{:?} is not a jump-family operation", inst.op),
        }
    }

    /// BRK is logically a 2-byte instruction: the byte after the opcode is a
    /// padding/signature byte that real monitors used to identify the break
    /// reason. It is skipped here exactly as `operand_address` would skip it
    /// for any other absolute-length-1 operand.
    fn brk(&mut self) {
        let return_pc = self.pc.wrapping_add(1);
        self.push_u16(return_pc);
        let status = self.p | StatusFlag::Break as u8 | StatusFlag::Unused as u8;
        self.push_u8(status);
        self.set_flag(StatusFlag::InterruptDisable, true);
        self.pc = self.read_vector(InterruptVector::IrqOrBreak);
    }

    fn branch(&mut self, inst: Instruction, take: bool) {
        let target = self.operand_address(inst.mode);
        if take {
            self.pc = target;
        }
    }
}
