use arch::{table, Mnemonic, Mode};

use crate::error::Error;

/// Settle the mode actually encoded: literal branch targets go relative and
/// zero-page forms the mnemonic lacks are widened to their absolute counterpart.
pub fn fit(mnemonic: Mnemonic, mode: Mode) -> Mode {
    if mnemonic.is_branch() && matches!(mode, Mode::ZeroPage | Mode::Absolute) {
        return Mode::Relative;
    }
    if table::opcode(mnemonic, mode).is_none() {
        if let Some(wide) = mode.widen() {
            if table::opcode(mnemonic, wide).is_some() {
                return wide;
            }
        }
    }
    mode
}

/// Displacement from the address following a branch at `addr` to `target`.
pub fn branch_offset(addr: u16, target: u16) -> Result<u8, Error> {
    let offset = target as i32 - (addr as i32 + 2);
    if !(-128..=127).contains(&offset) {
        return Err(Error::BranchRange {
            addr,
            target,
            offset,
        });
    }
    Ok(offset as i8 as u8)
}

/// Opcode followed by the operand in little-endian order.
pub fn encode(mnemonic: Mnemonic, mode: Mode, value: u16) -> Result<Vec<u8>, Error> {
    let opcode =
        table::opcode(mnemonic, mode).ok_or(Error::InvalidAddressingMode(mnemonic, mode))?;
    let mut bytes = vec![opcode];
    match mode.width() {
        0 => {}
        1 => bytes.push(value as u8),
        _ => bytes.extend_from_slice(&value.to_le_bytes()),
    }
    Ok(bytes)
}
