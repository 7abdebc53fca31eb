use bitcoin::opcodes::all::{OP_PUSHBYTES_0, OP_PUSHNUM_1, OP_PUSHNUM_NEG1, OP_RETURN};
use bitcoin::opcodes::Opcode;
use bitcoin::script::{Instruction, Script};

// One decompiled element of a locking script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    // Non-push opcode, or a push that has a minimal opcode form
    Op(Opcode),
    // Literal bytes pushed onto the stack
    Data(Vec<u8>),
}

impl Chunk {
    pub fn is_op(&self, opcode: Opcode) -> bool {
        matches!(self, Chunk::Op(op) if *op == opcode)
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            Chunk::Data(data) => Some(data),
            Chunk::Op(_) => None,
        }
    }
}

// Pushes that a minimal encoder would have written as a single opcode
fn minimal_op(data: &[u8]) -> Option<Opcode> {
    match data {
        [] => Some(OP_PUSHBYTES_0),
        [n @ 1..=16] => Some(Opcode::from(OP_PUSHNUM_1.to_u8() + n - 1)),
        [0x81] => Some(OP_PUSHNUM_NEG1),
        _ => None,
    }
}

impl From<Instruction<'_>> for Chunk {
    fn from(instruction: Instruction<'_>) -> Self {
        match instruction {
            Instruction::Op(op) => Chunk::Op(op),
            Instruction::PushBytes(bytes) => {
                // Small-number and empty pushes collapse to their opcode form
                match minimal_op(bytes.as_bytes()) {
                    Some(op) => Chunk::Op(op),
                    None => Chunk::Data(bytes.as_bytes().to_vec()),
                }
            }
        }
    }
}

// Splits a script into chunks; None when any push runs past the end of the script,
// so a malformed script is never partially interpreted
pub fn decompile(script: &Script) -> Option<Vec<Chunk>> {
    script
        .instructions()
        .map(|instruction| instruction.ok().map(Chunk::from))
        .collect()
}

// Payload of an `OP_RETURN <data>` script, if the chunks have that shape
pub fn op_return_payload(chunks: &[Chunk]) -> Option<&[u8]> {
    match chunks {
        [first, second, ..] if first.is_op(OP_RETURN) => second.as_data(),
        _ => None,
    }
}
