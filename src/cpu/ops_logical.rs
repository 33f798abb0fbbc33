//! Logic, arithmetic (including BCD), compare, increment/decrement, and
//! shift/rotate operations.

use super::Cpu;
use crate::constants::StatusFlag;
use crate::opcodes::{Instruction, Mode, Operation};

fn bcd_to_bin(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

fn bin_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

impl Cpu {
    pub(crate) fn ops_logical(&mut self, inst: Instruction) {
        use Operation::*;
        match inst.op {
            And => {
                let value = self.operand_value(inst.mode);
                self.a &= value;
                self.update_zero_and_negative(self.a);
            }
            Eor => {
                let value = self.operand_value(inst.mode);
                self.a ^= value;
                self.update_zero_and_negative(self.a);
            }
            Ora => {
                let value = self.operand_value(inst.mode);
                self.a |= value;
                self.update_zero_and_negative(self.a);
            }
            Bit => {
                let value = self.operand_value(inst.mode);
                self.set_flag(StatusFlag::Zero, self.a & value == 0);
                self.set_flag(StatusFlag::Overflow, value & 0x40 != 0);
                self.set_flag(StatusFlag::Negative, value & 0x80 != 0);
            }
            Adc => {
                let value = self.operand_value(inst.mode);
                if self.is_flag_set(StatusFlag::Decimal) {
                    self.adc_decimal(value);
                } else {
                    self.adc_binary(value);
                }
            }
            Sbc => {
                let value = self.operand_value(inst.mode);
                if self.is_flag_set(StatusFlag::Decimal) {
                    self.sbc_decimal(value);
                } else {
                    self.sbc_binary(value);
                }
            }
            Cmp => {
                let value = self.operand_value(inst.mode);
                self.compare(self.a, value);
            }
            Cpx => {
                let value = self.operand_value(inst.mode);
                self.compare(self.x, value);
            }
            Cpy => {
                let value = self.operand_value(inst.mode);
                self.compare(self.y, value);
            }
            Inc => {
                let address = self.operand_address(inst.mode);
                let result = self.peek_u8(address).wrapping_add(1);
                self.write_u8(address, result);
                self.update_zero_and_negative(result);
            }
            Inx => {
                self.x = self.x.wrapping_add(1);
                self.update_zero_and_negative(self.x);
            }
            Iny => {
                self.y = self.y.wrapping_add(1);
                self.update_zero_and_negative(self.y);
            }
            Dec => {
                let address = self.operand_address(inst.mode);
                let result = self.peek_u8(address).wrapping_sub(1);
                self.write_u8(address, result);
                self.update_zero_and_negative(result);
            }
            Dex => {
                self.x = self.x.wrapping_sub(1);
                self.update_zero_and_negative(self.x);
            }
            Dey => {
                self.y = self.y.wrapping_sub(1);
                self.update_zero_and_negative(self.y);
            }
            Asl => self.shift(inst.mode, |cpu, input| {
                cpu.set_flag(StatusFlag::Carry, input & 0x80 != 0);
                input << 1
            }),
            Lsr => self.shift(inst.mode, |cpu, input| {
                cpu.set_flag(StatusFlag::Carry, input & 0x01 != 0);
                input >> 1
            }),
            Rol => self.shift(inst.mode, |cpu, input| {
                let carry_in = cpu.is_flag_set(StatusFlag::Carry) as u8;
                cpu.set_flag(StatusFlag::Carry, input & 0x80 != 0);
                (input << 1) | carry_in
            }),
            Ror => self.shift(inst.mode, |cpu, input| {
                let carry_in = cpu.is_flag_set(StatusFlag::Carry) as u8;
                cpu.set_flag(StatusFlag::Carry, input & 0x01 != 0);
                (input >> 1) | (carry_in << 7)
            }),
            _ => unreachable!("{:?} is not a logical-family operation", inst.op),
        }
    }

    fn shift(&mut self, mode: Mode, compute: impl Fn(&mut Cpu, u8) -> u8) {
        let (input, address) = self.operand_value_and_address(mode);
        let result = compute(self, input);
        match address {
            Some(address) => self.write_u8(address, result),
            None => self.a = result,
        }
        self.update_zero_and_negative(result);
    }

    fn compare(&mut self, register: u8, value: u8) {
        let result = register.wrapping_sub(value);
        self.set_flag(StatusFlag::Carry, register >= value);
        self.set_flag(StatusFlag::Zero, register == value);
        self.set_flag(StatusFlag::Negative, result & 0x80 != 0);
    }

    fn adc_binary(&mut self, value: u8) {
        let carry_in = self.is_flag_set(StatusFlag::Carry) as u16;
        let sum = self.a as u16 + value as u16 + carry_in;
        let result = sum as u8;
        self.set_flag(StatusFlag::Carry, sum > 0xFF);
        self.set_flag(
            StatusFlag::Overflow,
            (self.a ^ result) & (value ^ result) & 0x80 != 0,
        );
        self.a = result;
        self.update_zero_and_negative(result);
    }

    fn sbc_binary(&mut self, value: u8) {
        let borrow = if self.is_flag_set(StatusFlag::Carry) { 0 } else { 1 };
        let diff = self.a as i32 - value as i32 - borrow;
        let result = (diff & 0xFF) as u8;
        self.set_flag(StatusFlag::Carry, diff >= 0);
        self.set_flag(
            StatusFlag::Overflow,
            (self.a ^ result) & (self.a ^ value) & 0x80 != 0,
        );
        self.a = result;
        self.update_zero_and_negative(result);
    }

    /// BCD addition: converts both operands from packed decimal, adds them
    /// as ordinary integers, and re-packs the 0-99 result. The carry flag
    /// reflects a decimal carry (sum >= 100), not a binary one.
    fn adc_decimal(&mut self, value: u8) {
        let carry_in = self.is_flag_set(StatusFlag::Carry) as u16;
        let sum = bcd_to_bin(self.a) as u16 + bcd_to_bin(value) as u16 + carry_in;
        self.set_flag(StatusFlag::Carry, sum >= 100);
        let result = bin_to_bcd((sum % 100) as u8);
        self.a = result;
        self.update_zero_and_negative(result);
    }

    /// BCD subtraction, mirroring `adc_decimal`: a decimal borrow wraps the
    /// 0-99 result rather than the binary one.
    fn sbc_decimal(&mut self, value: u8) {
        let borrow = if self.is_flag_set(StatusFlag::Carry) { 0 } else { 1 };
        let diff = bcd_to_bin(self.a) as i32 - bcd_to_bin(value) as i32 - borrow;
        self.set_flag(StatusFlag::Carry, diff >= 0);
        let wrapped = ((diff % 100) + 100) % 100;
        let result = bin_to_bcd(wrapped as u8);
        self.a = result;
        self.update_zero_and_negative(result);
    }
}
