// Copyright 2025 wirebench Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # wirebench CLI
//!
//! Command-line entry point for the wirebench protocol comparison.
//!
//! - `wirebench rpc-server`: binary RPC server backed by a worker pool
//! - `wirebench http-server`: HTTP/JSON server
//! - `wirebench bench`: run both clients against the servers and print the
//!   latency report
//!
//! Argument parsing lives in the binary (`argh`); this crate holds the
//! helpers that turn raw flag values into validated settings.

pub mod config;
