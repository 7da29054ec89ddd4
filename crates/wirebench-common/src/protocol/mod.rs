pub mod error;
pub mod messages;
pub mod rpc;


pub use error::{Result, WirebenchError};
pub use messages::{
    ErrorBody, MinMaxResponse, Number, NumberList, SortedResponse, Text, WordCountResponse,
};
pub use rpc::{Call, Reply, RequestId, RpcRequest, RpcResponse, Status, StatusCode};
