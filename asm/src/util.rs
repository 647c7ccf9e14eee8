use color_print::{cformat, cprintln};

use crate::assembler::Program;

/// Listing lines: address and emitted bytes beside each source line.
pub fn dump(lines: &[&str], program: &Program) -> Vec<String> {
    let mut records = program.records.iter().peekable();
    lines
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let line_num = idx + 1;
            match records.next_if(|record| record.line == line_num) {
                Some(record) => {
                    let bin_str = program
                        .bytes_at(record.addr, record.len)
                        .iter()
                        .map(|b| format!("{:02X}", b))
                        .collect::<Vec<_>>()
                        .join(" ");
                    format!("[{:04X}] {:<8} | {:>4}: {}", record.addr, bin_str, line_num, raw)
                }
                None => format!("{:16}| {:>4}: {}", "", line_num, raw),
            }
        })
        .collect()
}

pub fn print_dump(path: &str, lines: &[&str], program: &Program) {
    cprintln!(
        "{}+------[<underline>{}</>]{}",
        "-".repeat(16),
        path,
        "-".repeat(45usize.saturating_sub(path.len()))
    );
    for line in dump(lines, program) {
        println!("{}", line);
    }
    println!("----------------+-----------------------------------------------------");
    for (name, symbol) in program.symbols.iter() {
        println!("{}", cformat!("<g>{:<16}</> <y>${:04X}</>", name, symbol.value));
    }
}

/// 16 bytes per row with an ASCII gutter; runs of all-zero rows collapse to `*`.
pub fn hex_dump(program: &Program) -> Vec<String> {
    let mut rows = vec![];
    let mut zeros = false;
    for (idx, chunk) in program.bytes.chunks(16).enumerate() {
        if chunk.iter().all(|&b| b == 0) {
            if !zeros {
                rows.push("*".to_string());
                zeros = true;
            }
            continue;
        }
        zeros = false;

        let hex = chunk
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(" ");
        let ascii: String = chunk
            .iter()
            .map(|&b| if (0x20..=0x7E).contains(&b) { b as char } else { '.' })
            .collect();
        let addr = program.origin as usize + idx * 16;
        rows.push(format!("{:08x}  {:<47}  |{}|", addr, hex, ascii));
    }
    rows
}

pub fn print_hex(program: &Program) {
    for row in hex_dump(program) {
        match row.as_str() {
            "*" => cprintln!("<blue>*</>"),
            _ => println!("{}", row),
        }
    }
}
