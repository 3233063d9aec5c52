use modpdu_tools::common::{format_hex, parse_bool, parse_hex};

fn main() {
    for sample in ["true", "0", "on", "off", "yes", "no"] {
        println!("{sample} => {:?}", parse_bool(sample));
    }
    for sample in ["41 00 00 00 01", "0x83:02", "abc"] {
        match parse_hex(sample) {
            Ok(bytes) => println!("{sample:?} => {}", format_hex(&bytes)),
            Err(err) => println!("{sample:?} => {err}"),
        }
    }
}
