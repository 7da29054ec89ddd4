use crate::protocol::error::Result;
use crate::protocol::{RpcRequest, RpcResponse};

/// Postcard codec for binary-RPC envelopes.
///
/// Postcard is a compact, non-self-describing format: both peers must agree
/// on the envelope types, which they do by sharing this crate.
///
/// # Example
///
/// ```
/// use wirebench_common::transport::PostcardCodec;
/// use wirebench_common::protocol::{Call, NumberList, RpcRequest};
///
/// let request = RpcRequest::new(Call::Primes(NumberList::new([5, 1, 9, 3, 7])));
/// let encoded = PostcardCodec::encode_request(&request).unwrap();
/// let decoded = PostcardCodec::decode_request(&encoded).unwrap();
/// assert_eq!(request, decoded);
/// ```
pub struct PostcardCodec;

impl PostcardCodec {
    pub fn encode_request(request: &RpcRequest) -> Result<Vec<u8>> {
        Ok(postcard::to_allocvec(request)?)
    }

    pub fn decode_request(data: &[u8]) -> Result<RpcRequest> {
        Ok(postcard::from_bytes(data)?)
    }

    pub fn encode_response(response: &RpcResponse) -> Result<Vec<u8>> {
        Ok(postcard::to_allocvec(response)?)
    }

    pub fn decode_response(data: &[u8]) -> Result<RpcResponse> {
        Ok(postcard::from_bytes(data)?)
    }
}
