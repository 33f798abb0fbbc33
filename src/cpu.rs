//! The register file, addressing-mode engine, and step/interrupt control.
//!
//! Operation semantics themselves live in the sibling `ops_*` modules, split
//! by family: loads/stores/transfers/stack, logic/arithmetic/compare/shift,
//! and control flow.

mod ops_jump;
mod ops_logical;
mod ops_move;

#[cfg(test)]
mod test_helpers;

use crate::bus::SharedBus;
use crate::constants::{InterruptVector, StatusFlag, RESET_STACK_POINTER, RESET_STATUS_FLAG, STACK_PAGE};
use crate::decoder::decode;
use crate::opcodes::{Instruction, Mode, Operation};

/// A MOS 6502 execution core bound to an externally supplied [`Bus`](crate::bus::Bus).
pub struct Cpu {
    pub bus: SharedBus,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub p: u8,
    /// The instruction most recently decoded by `step`, retained for
    /// inspection (e.g. to detect `Operation::Err`).
    pub current_instruction: Instruction,
    /// Latched independently of `pending_irq`: both can be pending at the
    /// same step boundary, and servicing one must not drop the other.
    pending_nmi: bool,
    pending_irq: bool,
    /// Bounds a `run_until`-style loop in tests; not part of the public
    /// execution contract.
    pub max_steps: Option<u64>,
    pub step_count: u64,
}

impl Cpu {
    /// Bind a CPU to a bus. Registers are left undefined; call `reset`
    /// before stepping.
    pub fn new(bus: SharedBus) -> Self {
        Cpu {
            bus,
            a: 0,
            x: 0,
            y: 0,
            sp: RESET_STACK_POINTER,
            pc: 0,
            p: RESET_STATUS_FLAG,
            current_instruction: Instruction::ERR,
            pending_nmi: false,
            pending_irq: false,
            max_steps: None,
            step_count: 0,
        }
    }

    /// Put the CPU into its power-on/reset state and load `PC` from the
    /// reset vector.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = RESET_STACK_POINTER;
        self.p = RESET_STATUS_FLAG;
        self.pc = self.read_vector(InterruptVector::Reset);
        self.pending_nmi = false;
        self.pending_irq = false;
        self.step_count = 0;
        self.current_instruction = Instruction::new(Operation::Nop, Mode::Implied);
    }

    /// Request a maskable interrupt; serviced at the start of the next `step`
    /// unless `I` is set, in which case it stays latched for a later one.
    pub fn irq(&mut self) {
        self.pending_irq = true;
    }

    /// Request a non-maskable interrupt; serviced at the start of the next
    /// `step` regardless of `I`. NMI takes priority over a pending IRQ, but
    /// does not clear it: a still-latched IRQ is serviced at the following
    /// boundary.
    pub fn nmi(&mut self) {
        self.pending_nmi = true;
    }

    /// Execute exactly one instruction, servicing a pending interrupt first
    /// if one is latched and eligible.
    pub fn step(&mut self) {
        if self.service_pending_interrupt() {
            return;
        }
        let opcode = self.next_u8();
        let inst = decode(opcode);
        self.current_instruction = inst;
        self.execute(inst);
        self.step_count += 1;
    }

    /// Run `step` until `should_stop` returns true or `max_steps` (if set) is
    /// reached. Intended for tests and simple embedders; not part of the
    /// core's minimal contract.
    pub fn run_until(&mut self, mut should_stop: impl FnMut(&Cpu) -> bool) {
        loop {
            if should_stop(self) {
                return;
            }
            if let Some(max) = self.max_steps {
                if self.step_count >= max {
                    return;
                }
            }
            self.step();
        }
    }

    fn service_pending_interrupt(&mut self) -> bool {
        if self.pending_nmi {
            self.pending_nmi = false;
            self.enter_interrupt(InterruptVector::NonMaskableInterrupt);
            return true;
        }
        if self.pending_irq {
            if self.is_flag_set(StatusFlag::InterruptDisable) {
                return false;
            }
            self.pending_irq = false;
            self.enter_interrupt(InterruptVector::IrqOrBreak);
            return true;
        }
        false
    }

    fn enter_interrupt(&mut self, vector: InterruptVector) {
        let pc = self.pc;
        self.push_u16(pc);
        let status = (self.p & !(StatusFlag::Break as u8)) | StatusFlag::Unused as u8;
        self.push_u8(status);
        self.set_flag(StatusFlag::InterruptDisable, true);
        self.pc = self.read_vector(vector);
    }

    fn execute(&mut self, inst: Instruction) {
        use Operation::*;
        match inst.op {
            Lda | Ldx | Ldy | Sta | Stx | Sty | Tax | Tay | Txa | Tya | Tsx | Txs | Pha | Php
            | Pla | Plp => self.ops_move(inst),
            And | Eor | Ora | Bit | Adc | Sbc | Cmp | Cpx | Cpy | Inc | Inx | Iny | Dec | Dex
            | Dey | Asl | Lsr | Rol | Ror => self.ops_logical(inst),
            Jmp | Jsr | Rts | Beq | Bne | Bcs | Bcc | Bmi | Bpl | Bvs | Bvc | Sec | Sei | Sed
            | Clc | Cli | Cld | Clv | Brk | Nop | Rti | Err => self.ops_jump(inst),
        }
    }

    // --- Fetch helpers (advance PC as they read) ---------------------------

    pub(crate) fn next_u8(&mut self) -> u8 {
        let value = self.bus.borrow_mut().read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    pub(crate) fn next_u16(&mut self) -> u16 {
        let lo = self.next_u8() as u16;
        let hi = self.next_u8() as u16;
        (hi << 8) | lo
    }

    pub(crate) fn peek_u8(&self, address: u16) -> u8 {
        self.bus.borrow_mut().read(address)
    }

    pub(crate) fn write_u8(&self, address: u16, value: u8) {
        self.bus.borrow_mut().write(address, value);
    }

    fn read_vector(&self, vector: InterruptVector) -> u16 {
        self.bus.borrow_mut().read_u16(vector as u16)
    }

    // --- Addressing-mode engine ---------------------------------------------

    /// Resolve the effective address for a memory-referencing mode. Panics
    /// for modes that have no address (`Implied`, `Accumulator`, `Immediate`):
    /// callers must not ask for one in those modes.
    pub(crate) fn operand_address(&mut self, mode: Mode) -> u16 {
        match mode {
            Mode::Implied | Mode::Accumulator | Mode::Immediate => {
                panic!("{:?} addressing mode has no effective address", mode)
            }
            Mode::ZeroPage => self.next_u8() as u16,
            Mode::ZeroPageX => (self.next_u8().wrapping_add(self.x)) as u16,
            Mode::ZeroPageY => (self.next_u8().wrapping_add(self.y)) as u16,
            Mode::Relative => {
                let offset = self.next_u8() as i8;
                self.pc.wrapping_add(offset as u16)
            }
            Mode::Absolute => self.next_u16(),
            Mode::AbsoluteX => self.next_u16().wrapping_add(self.x as u16),
            Mode::AbsoluteY => self.next_u16().wrapping_add(self.y as u16),
            Mode::Indirect => {
                let ptr = self.next_u16();
                self.read_u16_with_page_wrap_bug(ptr)
            }
            Mode::IndirectX => {
                let zp = self.next_u8().wrapping_add(self.x);
                self.read_u16_zero_page(zp)
            }
            Mode::IndirectY => {
                let zp = self.next_u8();
                self.read_u16_zero_page(zp).wrapping_add(self.y as u16)
            }
        }
    }

    /// A 16-bit read that wraps within the zero page for both bytes, as used
    /// by `IndirectX`/`IndirectY` pointer fetches.
    fn read_u16_zero_page(&self, zp: u8) -> u16 {
        let lo = self.peek_u8(zp as u16) as u16;
        let hi = self.peek_u8(zp.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    /// Reproduces the hardware indirect-JMP bug: if the pointer's low byte is
    /// `0xFF`, the high byte is fetched from the start of the same page
    /// rather than the start of the next one.
    fn read_u16_with_page_wrap_bug(&self, ptr: u16) -> u16 {
        let lo = self.peek_u8(ptr) as u16;
        let hi_addr = if ptr & 0x00FF == 0x00FF {
            ptr & 0xFF00
        } else {
            ptr.wrapping_add(1)
        };
        let hi = self.peek_u8(hi_addr) as u16;
        (hi << 8) | lo
    }

    /// Fetch the operand value for `mode`, returning the effective address
    /// too when the mode has one (`None` for `Accumulator`/`Immediate`).
    pub(crate) fn operand_value_and_address(&mut self, mode: Mode) -> (u8, Option<u16>) {
        match mode {
            Mode::Accumulator => (self.a, None),
            Mode::Immediate => (self.next_u8(), None),
            _ => {
                let address = self.operand_address(mode);
                (self.peek_u8(address), Some(address))
            }
        }
    }

    pub(crate) fn operand_value(&mut self, mode: Mode) -> u8 {
        self.operand_value_and_address(mode).0
    }

    // --- Stack ---------------------------------------------------------------

    pub(crate) fn push_u8(&mut self, value: u8) {
        let address = STACK_PAGE | self.sp as u16;
        self.write_u8(address, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pull_u8(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        let address = STACK_PAGE | self.sp as u16;
        self.peek_u8(address)
    }

    pub(crate) fn push_u16(&mut self, value: u16) {
        self.push_u8((value >> 8) as u8);
        self.push_u8(value as u8);
    }

    pub(crate) fn pull_u16(&mut self) -> u16 {
        let lo = self.pull_u8() as u16;
        let hi = self.pull_u8() as u16;
        (hi << 8) | lo
    }

    // --- Flags -----------------------------------------------------------------

    pub(crate) fn set_flag(&mut self, flag: StatusFlag, value: bool) {
        if value {
            self.p |= flag as u8;
        } else {
            self.p &= !(flag as u8);
        }
    }

    pub(crate) fn is_flag_set(&self, flag: StatusFlag) -> bool {
        self.p & (flag as u8) != 0
    }

    pub(crate) fn update_zero_and_negative(&mut self, value: u8) {
        self.set_flag(StatusFlag::Zero, value == 0);
        self.set_flag(StatusFlag::Negative, value & 0x80 != 0);
    }
}
