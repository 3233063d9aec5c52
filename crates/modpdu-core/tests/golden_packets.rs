use modpdu_core::encoding::Writer;
use modpdu_core::pdu::{
    ExceptionCode, ExceptionResponse, FunctionCode, Parsed, Pdu, ReadCoilsRequest,
    ReadDiscreteInputsRequest, ReadHoldingRegistersRequest, ReadInputRegistersRequest,
    ReadInputRegistersResponse, ReadTextRegistersRequest, RequestBody, ResponseBody,
    WriteMultipleCoilsRequest, WriteMultipleRegistersRequest, WriteSingleRegisterRequest,
    WriteSingleRegisterResponse,
};
use modpdu_core::{EncodeError, NoMatch, ValidationError};

const READ_HOLDING_REQ: &[u8] = &[0x03, 0x00, 0x6B, 0x00, 0x03];
const READ_HOLDING_RESP: &[u8] = &[0x03, 0x06, 0x02, 0x2B, 0x00, 0x00, 0x00, 0x64];
const READ_TEXT_REQ: &[u8] = &[0x41, 0x00, 0x00, 0x00, 0x01];
const READ_COILS_RESP: &[u8] = &[0x01, 0x03, 0xCD, 0x6B, 0x05];
const READ_DISCRETE_REQ: &[u8] = &[0x02, 0x00, 0xC4, 0x00, 0x16];
const READ_INPUT_RESP: &[u8] = &[0x04, 0x02, 0x00, 0x0A];
const WRITE_REGISTER_RESP: &[u8] = &[0x06, 0x00, 0x01, 0x00, 0x03];

#[test]
fn fc03_request_golden_encode() {
    let request = RequestBody::from(ReadHoldingRegistersRequest::new(0x006B, 0x0003).unwrap());

    let mut buf = [0u8; 16];
    let mut w = Writer::new(&mut buf);
    request.encode(&mut w).unwrap();
    assert_eq!(w.as_written(), READ_HOLDING_REQ);
}

#[test]
fn fc03_response_decode_and_helpers() {
    match ResponseBody::from_buffer(READ_HOLDING_RESP).unwrap() {
        Parsed::Match(ResponseBody::ReadHoldingRegisters(resp)) => {
            assert_eq!(resp.register_count(), 3);
            assert_eq!(resp.register(0), Some(0x022B));
            assert_eq!(resp.register(1), Some(0x0000));
            assert_eq!(resp.register(2), Some(0x0064));
        }
        other => panic!("expected read holding registers response, got {other:?}"),
    }
}

#[test]
fn fc02_request_golden_roundtrip() {
    let request = ReadDiscreteInputsRequest::new(0x00C4, 0x0016).unwrap();
    assert_eq!(request.payload(), READ_DISCRETE_REQ);

    let decoded = ReadDiscreteInputsRequest::from_buffer(READ_DISCRETE_REQ).unwrap();
    assert_eq!(decoded, Parsed::Match(request));
    assert_eq!(
        RequestBody::from_buffer(READ_DISCRETE_REQ).unwrap(),
        Parsed::Match(RequestBody::from(request))
    );
}

#[test]
fn fc04_response_golden_roundtrip() {
    let request = ReadInputRegistersRequest::new(0x0008, 1).unwrap();
    let response = ReadInputRegistersResponse::for_request(&request, &[0x000A]).unwrap();
    assert_eq!(response.payload(), READ_INPUT_RESP);

    match ResponseBody::from_buffer(READ_INPUT_RESP).unwrap() {
        Parsed::Match(ResponseBody::ReadInputRegisters(decoded)) => {
            assert_eq!(decoded, response);
            assert_eq!(decoded.register(0), Some(0x000A));
            assert_eq!(decoded.register(1), None);
        }
        other => panic!("expected read input registers response, got {other:?}"),
    }
}

#[test]
fn fc06_response_echoes_request() {
    let request = WriteSingleRegisterRequest::new(0x0001, 0x0003).unwrap();
    let response = WriteSingleRegisterResponse::from(&request);
    assert_eq!(response.payload(), WRITE_REGISTER_RESP);
    assert_eq!(request.payload(), WRITE_REGISTER_RESP);

    let decoded = WriteSingleRegisterResponse::from_buffer(WRITE_REGISTER_RESP).unwrap();
    assert_eq!(decoded, Parsed::Match(response));
    assert_eq!(
        ResponseBody::from_buffer(WRITE_REGISTER_RESP).unwrap(),
        Parsed::Match(ResponseBody::from(response))
    );
}

#[test]
fn fc01_response_from_reference_manual() {
    match ResponseBody::from_buffer(READ_COILS_RESP).unwrap() {
        Parsed::Match(ResponseBody::ReadCoils(resp)) => {
            let coils = resp.coils(19);
            assert_eq!(coils.len(), 19);
            assert!(coils[0]);
            assert!(!coils[1]);
            assert!(coils[18]);
            assert_eq!(resp.payload(), READ_COILS_RESP);
        }
        other => panic!("expected read coils response, got {other:?}"),
    }
}

#[test]
fn read_text_registers_golden_roundtrip() {
    let request = ReadTextRegistersRequest::new(0x0000, 0x0001).unwrap();
    assert_eq!(request.payload(), READ_TEXT_REQ);

    let decoded = ReadTextRegistersRequest::from_buffer(READ_TEXT_REQ)
        .unwrap()
        .ok()
        .unwrap();
    assert_eq!(decoded.start_address(), 0);
    assert_eq!(decoded.count(), 1);
    assert_eq!(decoded.function_code(), 0x41);
    assert_eq!(
        RequestBody::from_buffer(READ_TEXT_REQ).unwrap().ok().unwrap().function(),
        FunctionCode::ReadTextRegisters
    );
}

#[test]
fn read_text_registers_boundaries() {
    assert_eq!(
        ReadTextRegistersRequest::new(0xFFFF, 1).unwrap().start_address(),
        0xFFFF
    );
    assert_eq!(
        ReadTextRegistersRequest::new(0x1_0000, 1).unwrap_err(),
        ValidationError::InvalidStartAddress
    );
    assert_eq!(ReadTextRegistersRequest::new(1, 0x7D0).unwrap().count(), 2000);
    assert_eq!(
        ReadTextRegistersRequest::new(1, 0x7D1).unwrap_err(),
        ValidationError::InvalidQuantity
    );
}

#[test]
fn other_function_codes_never_match_read_text() {
    for fc in (0u8..=0xFF).filter(|fc| *fc != 0x41) {
        let buf = [fc, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(
            ReadTextRegistersRequest::from_buffer(&buf).unwrap(),
            Parsed::NoMatch(NoMatch::FunctionCode {
                expected: 0x41,
                found: fc
            })
        );
    }
}

#[test]
fn quantity_boundaries_are_validated() {
    assert_eq!(
        ReadHoldingRegistersRequest::new(0, 0).unwrap_err(),
        ValidationError::InvalidQuantity
    );
    assert_eq!(
        WriteMultipleRegistersRequest::new(0, &[0u16; 124]).unwrap_err(),
        ValidationError::InvalidQuantity
    );
    assert_eq!(
        WriteMultipleCoilsRequest::new(0, &[false; 1969]).unwrap_err(),
        ValidationError::InvalidQuantity
    );
}

#[test]
fn encode_into_short_buffer_fails_cleanly() {
    let request = ReadCoilsRequest::new(0x0013, 0x0013).unwrap();
    let mut buf = [0u8; 3];
    let mut w = Writer::new(&mut buf);
    assert_eq!(
        request.encode(&mut w).unwrap_err(),
        EncodeError::BufferTooSmall {
            needed: 5,
            available: 3
        }
    );
}

#[test]
fn exception_roundtrip() {
    let bytes = [0x83u8, 0x02];
    let decoded = ResponseBody::from_buffer(&bytes).unwrap().ok().unwrap();
    assert_eq!(
        decoded,
        ResponseBody::Exception(
            ExceptionResponse::new(0x03, ExceptionCode::IllegalDataAddress).unwrap()
        )
    );
    assert_eq!(decoded.payload(), bytes);
}
