//! Loads, stores, register transfers, and stack push/pull.

use super::Cpu;
use crate::constants::StatusFlag;
use crate::opcodes::{Instruction, Operation};

impl Cpu {
    pub(crate) fn ops_move(&mut self, inst: Instruction) {
        use Operation::*;
        match inst.op {
            Lda => {
                let value = self.operand_value(inst.mode);
                self.a = value;
                self.update_zero_and_negative(value);
            }
            Ldx => {
                let value = self.operand_value(inst.mode);
                self.x = value;
                self.update_zero_and_negative(value);
            }
            Ldy => {
                let value = self.operand_value(inst.mode);
                self.y = value;
                self.update_zero_and_negative(value);
            }
            Sta => {
                let address = self.operand_address(inst.mode);
                self.write_u8(address, self.a);
            }
            Stx => {
                let address = self.operand_address(inst.mode);
                self.write_u8(address, self.x);
            }
            Sty => {
                let address = self.operand_address(inst.mode);
                self.write_u8(address, self.y);
            }
            Tax => {
                self.x = self.a;
                self.update_zero_and_negative(self.x);
            }
            Tay => {
                self.y = self.a;
                self.update_zero_and_negative(self.y);
            }
            Txa => {
                self.a = self.x;
                self.update_zero_and_negative(self.a);
            }
            Tya => {
                self.a = self.y;
                self.update_zero_and_negative(self.a);
            }
            Tsx => {
                self.x = self.sp;
                self.update_zero_and_negative(self.x);
            }
            // TXS is the one transfer that leaves the flags untouched: it
            // moves X into the stack pointer, not an observable register.
            Txs => {
                self.sp = self.x;
            }
            Pha => self.push_u8(self.a),
            Php => {
                let status = self.p | StatusFlag::Break as u8 | StatusFlag::Unused as u8;
                self.push_u8(status);
            }
            Pla => {
                self.a = self.pull_u8();
                self.update_zero_and_negative(self.a);
            }
            Plp => {
                let pulled = self.pull_u8();
                self.p = (pulled & !(StatusFlag::Break as u8)) | StatusFlag::Unused as u8;
            }
            _ => unreachable!("{:?} is not a move-family operation", inst.op),
        }
    }
}
