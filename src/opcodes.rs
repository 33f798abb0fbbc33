//! The closed instruction-set vocabulary: addressing modes, operations, and
//! the `(op, mode)` pair a decoded opcode resolves to.

/// Addressing modes the 6502 ISA exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
}

impl Mode {
    /// Number of operand bytes following the opcode byte.
    pub fn operand_length(self) -> u16 {
        match self {
            Mode::Implied | Mode::Accumulator => 0,
            Mode::Immediate
            | Mode::ZeroPage
            | Mode::ZeroPageX
            | Mode::ZeroPageY
            | Mode::Relative
            | Mode::IndirectX
            | Mode::IndirectY => 1,
            Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 2,
        }
    }
}

/// The documented 6502 operations, plus `Err` for any opcode with no legal
/// meaning in the ISA. There is deliberately no attempt to emulate the
/// individual undocumented opcodes (SLO, RLA, LAX, ...): they all decode to
/// `Err` and execute as a one-byte no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Txa,
    Tya,
    Tsx,
    Txs,
    Pha,
    Php,
    Pla,
    Plp,
    And,
    Eor,
    Ora,
    Bit,
    Adc,
    Sbc,
    Cmp,
    Cpx,
    Cpy,
    Inc,
    Inx,
    Iny,
    Dec,
    Dex,
    Dey,
    Asl,
    Lsr,
    Rol,
    Ror,
    Jmp,
    Jsr,
    Rts,
    Beq,
    Bne,
    Bcs,
    Bcc,
    Bmi,
    Bpl,
    Bvs,
    Bvc,
    Sec,
    Sei,
    Sed,
    Clc,
    Cli,
    Cld,
    Clv,
    Brk,
    Nop,
    Rti,
    Err,
}

impl Operation {
    /// Three-letter mnemonic, used by the disassembler.
    pub fn mnemonic(self) -> &'static str {
        use Operation::*;
        match self {
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Txa => "TXA",
            Tya => "TYA",
            Tsx => "TSX",
            Txs => "TXS",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            And => "AND",
            Eor => "EOR",
            Ora => "ORA",
            Bit => "BIT",
            Adc => "ADC",
            Sbc => "SBC",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Asl => "ASL",
            Lsr => "LSR",
            Rol => "ROL",
            Ror => "ROR",
            Jmp => "JMP",
            Jsr => "JSR",
            Rts => "RTS",
            Beq => "BEQ",
            Bne => "BNE",
            Bcs => "BCS",
            Bcc => "BCC",
            Bmi => "BMI",
            Bpl => "BPL",
            Bvs => "BVS",
            Bvc => "BVC",
            Sec => "SEC",
            Sei => "SEI",
            Sed => "SED",
            Clc => "CLC",
            Cli => "CLI",
            Cld => "CLD",
            Clv => "CLV",
            Brk => "BRK",
            Nop => "NOP",
            Rti => "RTI",
            Err => "<decoder error>",
        }
    }
}

/// A fully decoded instruction: an operation paired with the addressing mode
/// it was decoded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: Operation,
    pub mode: Mode,
}

impl Instruction {
    pub const fn new(op: Operation, mode: Mode) -> Self {
        Instruction { op, mode }
    }

    /// The one-byte-NOP "this opcode has no meaning" sentinel.
    pub const ERR: Instruction = Instruction::new(Operation::Err, Mode::Implied);
}
