use clap::Parser;
use modpdu_tools::common::{decode, format_hex, init_tracing, parse_hex, BodyKind};

#[derive(Debug, Parser)]
#[command(name = "pdudecode", about = "Decode a Modbus PDU body from hex")]
struct Args {
    /// Decode as a request (client to server) or response body.
    #[arg(long, value_enum, default_value_t = BodyKind::Request)]
    kind: BodyKind,
    /// PDU bytes in hex, starting with the function code.
    #[arg(value_parser = parse_hex)]
    pdu: Vec<u8>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let body = decode(args.kind, &args.pdu)?;
    let pdu = body.as_pdu();
    println!(
        "{} fc=0x{:02X} bytes={}",
        pdu.name(),
        pdu.function_code(),
        pdu.byte_count()
    );
    if pdu.byte_count() < args.pdu.len() {
        println!(
            "ignored {} trailing byte(s): {}",
            args.pdu.len() - pdu.byte_count(),
            format_hex(&args.pdu[pdu.byte_count()..])
        );
    }
    println!("{body:#?}");
    Ok(())
}
