use modpdu_core::pdu::{
    MaskWriteRegisterRequest, MaskWriteRegisterResponse, Parsed, Pdu, ReadCoilsRequest,
    ReadDiscreteInputsRequest, ReadHoldingRegistersRequest, ReadHoldingRegistersResponse,
    ReadInputRegistersRequest, ReadTextRegistersRequest, ReadWriteMultipleRegistersRequest,
    RequestBody, ResponseBody, WriteMultipleCoilsRequest, WriteMultipleCoilsResponse,
    WriteMultipleRegistersRequest, WriteMultipleRegistersResponse, WriteSingleCoilRequest,
    WriteSingleCoilResponse, WriteSingleRegisterRequest, WriteSingleRegisterResponse,
};
use modpdu_core::{NoMatch, ValidationError};
use proptest::collection::vec;
use proptest::prelude::*;

fn request_body() -> impl Strategy<Value = RequestBody> {
    prop_oneof![
        (any::<u16>(), 1u16..=2000)
            .prop_map(|(s, q)| RequestBody::from(ReadCoilsRequest::new(s, q).unwrap())),
        (any::<u16>(), 1u16..=2000)
            .prop_map(|(s, q)| RequestBody::from(ReadDiscreteInputsRequest::new(s, q).unwrap())),
        (any::<u16>(), 1u16..=125)
            .prop_map(|(s, q)| {
                RequestBody::from(ReadHoldingRegistersRequest::new(s, q).unwrap())
            }),
        (any::<u16>(), 1u16..=125)
            .prop_map(|(s, q)| RequestBody::from(ReadInputRegistersRequest::new(s, q).unwrap())),
        (any::<u16>(), any::<bool>())
            .prop_map(|(a, v)| RequestBody::from(WriteSingleCoilRequest::new(a, v).unwrap())),
        (any::<u16>(), any::<u16>())
            .prop_map(|(a, v)| RequestBody::from(WriteSingleRegisterRequest::new(a, v).unwrap())),
        (any::<u16>(), vec(any::<bool>(), 1..=1968))
            .prop_map(|(s, v)| RequestBody::from(WriteMultipleCoilsRequest::new(s, &v).unwrap())),
        (any::<u16>(), vec(any::<u16>(), 1..=123))
            .prop_map(|(s, v)| {
                RequestBody::from(WriteMultipleRegistersRequest::new(s, &v).unwrap())
            }),
        (any::<u16>(), any::<u16>(), any::<u16>())
            .prop_map(|(a, and, or)| {
                RequestBody::from(MaskWriteRegisterRequest::new(a, and, or).unwrap())
            }),
        (any::<u16>(), 1u16..=125, any::<u16>(), vec(any::<u16>(), 1..=121)).prop_map(
            |(rs, rq, ws, v)| {
                RequestBody::from(ReadWriteMultipleRegistersRequest::new(rs, rq, ws, &v).unwrap())
            }
        ),
        (any::<u16>(), 0u16..=0x7D0)
            .prop_map(|(s, c)| RequestBody::from(ReadTextRegistersRequest::new(s, c).unwrap())),
    ]
}

fn echo_response(request: &RequestBody) -> Option<ResponseBody> {
    let response: ResponseBody = match request {
        RequestBody::WriteSingleCoil(req) => WriteSingleCoilResponse::from(req).into(),
        RequestBody::WriteSingleRegister(req) => WriteSingleRegisterResponse::from(req).into(),
        RequestBody::WriteMultipleCoils(req) => WriteMultipleCoilsResponse::from(req).into(),
        RequestBody::WriteMultipleRegisters(req) => {
            WriteMultipleRegistersResponse::from(req).into()
        }
        RequestBody::MaskWriteRegister(req) => MaskWriteRegisterResponse::from(req).into(),
        _ => return None,
    };
    Some(response)
}

proptest! {
    #[test]
    fn read_text_registers_roundtrip(start in any::<u16>(), count in 0u16..=0x7D0) {
        let request = ReadTextRegistersRequest::new(start, count).unwrap();
        let bytes = request.payload();
        prop_assert_eq!(bytes.len(), request.byte_count());
        prop_assert_eq!(bytes.clone(), request.payload());

        let decoded = ReadTextRegistersRequest::from_buffer(&bytes).unwrap().ok().unwrap();
        prop_assert_eq!(decoded.start_address(), start);
        prop_assert_eq!(decoded.count(), count);
        prop_assert_eq!(decoded.function_code(), 0x41);
    }

    #[test]
    fn read_text_registers_rejects_wide_values(start in 0x1_0000u32..=u32::MAX, count in 0x7D1u32..=u32::MAX) {
        prop_assert_eq!(
            ReadTextRegistersRequest::new(start, 1).unwrap_err(),
            ValidationError::InvalidStartAddress
        );
        prop_assert_eq!(
            ReadTextRegistersRequest::new(0, count).unwrap_err(),
            ValidationError::InvalidQuantity
        );
    }

    #[test]
    fn truncated_read_text_buffer_is_no_match(len in 0usize..5, fill in any::<u8>()) {
        let mut buf = vec![fill; len];
        if let Some(first) = buf.first_mut() {
            *first = 0x41;
        }
        let parsed = ReadTextRegistersRequest::from_buffer(&buf).unwrap();
        let is_truncated = matches!(parsed, Parsed::NoMatch(NoMatch::Truncated { .. }));
        prop_assert!(is_truncated);
    }

    #[test]
    fn request_constructors_do_not_panic(start in any::<u32>(), quantity in any::<u32>()) {
        if let Ok(req) = ReadHoldingRegistersRequest::new(start, quantity) {
            prop_assert_eq!(req.payload().len(), 5);
        }
    }

    #[test]
    fn random_request_decode_does_not_panic(data in proptest::collection::vec(any::<u8>(), 0..300)) {
        if let Ok(Parsed::Match(body)) = RequestBody::from_buffer(&data) {
            let bytes = body.payload();
            prop_assert!(bytes.len() <= data.len());
            prop_assert_eq!(bytes[0], data[0]);
        }
    }

    #[test]
    fn random_response_decode_does_not_panic(data in proptest::collection::vec(any::<u8>(), 0..300)) {
        let _ = ResponseBody::from_buffer(&data);
    }

    #[test]
    fn holding_registers_response_roundtrip(registers in proptest::collection::vec(any::<u16>(), 1..=125)) {
        let mut frame = Vec::with_capacity(registers.len() * 2 + 2);
        frame.push(0x03);
        frame.push((registers.len() * 2) as u8);
        for reg in &registers {
            frame.extend_from_slice(&reg.to_be_bytes());
        }

        let decoded = ReadHoldingRegistersResponse::from_buffer(&frame).unwrap().ok().unwrap();
        prop_assert_eq!(decoded.values(), registers.as_slice());
        prop_assert_eq!(decoded.payload(), frame);
    }

    #[test]
    fn every_request_roundtrips(request in request_body()) {
        let bytes = request.payload();
        prop_assert_eq!(bytes.len(), request.byte_count());
        prop_assert_eq!(&bytes, &request.payload());
        prop_assert_eq!(bytes[0], request.function_code());
        prop_assert_eq!(RequestBody::from_buffer(&bytes), Ok(Parsed::Match(request.clone())));
    }

    #[test]
    fn echo_responses_roundtrip(request in request_body()) {
        if let Some(response) = echo_response(&request) {
            let bytes = response.payload();
            prop_assert_eq!(bytes.len(), response.byte_count());
            prop_assert_eq!(response.function_code(), request.function_code());
            prop_assert_eq!(ResponseBody::from_buffer(&bytes), Ok(Parsed::Match(response)));
        }
    }

    #[test]
    fn write_multiple_coils_roundtrip(start in any::<u16>(), values in proptest::collection::vec(any::<bool>(), 1..=1968)) {
        let request = WriteMultipleCoilsRequest::new(start, &values).unwrap();
        let decoded = WriteMultipleCoilsRequest::from_buffer(&request.payload()).unwrap();
        prop_assert_eq!(decoded, Parsed::Match(request));
    }
}
