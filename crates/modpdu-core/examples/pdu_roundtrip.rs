use modpdu_core::pdu::{
    Parsed, Pdu, ReadTextRegistersRequest, ReadTextRegistersResponse, ResponseBody,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let request = ReadTextRegistersRequest::new(0x0010, 4)?;
    println!("{} request pdu: {:02X?}", request.name(), request.payload());

    // a server answering the request above
    let response =
        ReadTextRegistersResponse::for_request(&request, &[0x5445, 0x5354, 0x2D31, 0x0000])?;
    let response_bytes = response.payload();
    println!("response pdu: {response_bytes:02X?}");

    match ResponseBody::from_buffer(&response_bytes)? {
        Parsed::Match(ResponseBody::ReadTextRegisters(resp)) => {
            println!("text = {}", String::from_utf8_lossy(&resp.text_bytes()));
        }
        Parsed::Match(other) => println!("unexpected response: {other:?}"),
        Parsed::NoMatch(reason) => println!("not a response body: {reason}"),
    }
    Ok(())
}
