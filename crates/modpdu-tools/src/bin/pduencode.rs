use clap::{Parser, Subcommand};
use modpdu_core::pdu::{
    MaskWriteRegisterRequest, Pdu, ReadCoilsRequest, ReadDiscreteInputsRequest,
    ReadHoldingRegistersRequest, ReadInputRegistersRequest, ReadTextRegistersRequest,
    ReadWriteMultipleRegistersRequest, RequestBody, WriteMultipleCoilsRequest,
    WriteMultipleRegistersRequest, WriteSingleCoilRequest, WriteSingleRegisterRequest,
};
use modpdu_tools::common::{format_hex, init_tracing, parse_bool};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "pduencode", about = "Encode a Modbus request PDU body as hex")]
struct Args {
    #[command(subcommand)]
    request: RequestArgs,
}

/// Addresses and quantities are taken as u32 so out-of-range input reaches
/// the body validation instead of failing in the argument parser.
#[derive(Debug, Subcommand)]
enum RequestArgs {
    /// Read Coils (FC01)
    ReadCoils {
        #[arg(long)]
        start: u32,
        #[arg(long)]
        quantity: u32,
    },
    /// Read Discrete Inputs (FC02)
    ReadDiscreteInputs {
        #[arg(long)]
        start: u32,
        #[arg(long)]
        quantity: u32,
    },
    /// Read Holding Registers (FC03)
    ReadHolding {
        #[arg(long)]
        start: u32,
        #[arg(long)]
        quantity: u32,
    },
    /// Read Input Registers (FC04)
    ReadInput {
        #[arg(long)]
        start: u32,
        #[arg(long)]
        quantity: u32,
    },
    /// Write Single Coil (FC05)
    WriteCoil {
        #[arg(long)]
        address: u32,
        #[arg(long, value_parser = parse_bool)]
        value: bool,
    },
    /// Write Single Register (FC06)
    WriteRegister {
        #[arg(long)]
        address: u32,
        #[arg(long)]
        value: u16,
    },
    /// Write Multiple Coils (FC15)
    WriteCoils {
        #[arg(long)]
        start: u32,
        #[arg(long, value_delimiter = ',', num_args = 1.., value_parser = parse_bool)]
        values: Vec<bool>,
    },
    /// Write Multiple Registers (FC16)
    WriteRegisters {
        #[arg(long)]
        start: u32,
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        values: Vec<u16>,
    },
    /// Mask Write Register (FC22)
    MaskWrite {
        #[arg(long)]
        address: u32,
        #[arg(long)]
        and_mask: u16,
        #[arg(long)]
        or_mask: u16,
    },
    /// Read/Write Multiple Registers (FC23)
    ReadWrite {
        #[arg(long)]
        read_start: u32,
        #[arg(long)]
        read_quantity: u32,
        #[arg(long)]
        write_start: u32,
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        values: Vec<u16>,
    },
    /// Read Text Registers (FC 0x41)
    ReadText {
        #[arg(long)]
        start: u32,
        #[arg(long)]
        count: u32,
    },
}

impl RequestArgs {
    fn build(self) -> Result<RequestBody, modpdu_core::ValidationError> {
        let body = match self {
            Self::ReadCoils { start, quantity } => ReadCoilsRequest::new(start, quantity)?.into(),
            Self::ReadDiscreteInputs { start, quantity } => {
                ReadDiscreteInputsRequest::new(start, quantity)?.into()
            }
            Self::ReadHolding { start, quantity } => {
                ReadHoldingRegistersRequest::new(start, quantity)?.into()
            }
            Self::ReadInput { start, quantity } => {
                ReadInputRegistersRequest::new(start, quantity)?.into()
            }
            Self::WriteCoil { address, value } => WriteSingleCoilRequest::new(address, value)?.into(),
            Self::WriteRegister { address, value } => {
                WriteSingleRegisterRequest::new(address, value)?.into()
            }
            Self::WriteCoils { start, values } => {
                WriteMultipleCoilsRequest::new(start, &values)?.into()
            }
            Self::WriteRegisters { start, values } => {
                WriteMultipleRegistersRequest::new(start, &values)?.into()
            }
            Self::MaskWrite {
                address,
                and_mask,
                or_mask,
            } => MaskWriteRegisterRequest::new(address, and_mask, or_mask)?.into(),
            Self::ReadWrite {
                read_start,
                read_quantity,
                write_start,
                values,
            } => ReadWriteMultipleRegistersRequest::new(read_start, read_quantity, write_start, &values)?
                .into(),
            Self::ReadText { start, count } => ReadTextRegistersRequest::new(start, count)?.into(),
        };
        Ok(body)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let body = args.request.build()?;
    debug!(name = body.name(), len = body.byte_count(), "built request body");
    println!("{}", format_hex(&body.payload()));
    Ok(())
}
