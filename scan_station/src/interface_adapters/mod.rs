// Interface adapters: wire protocol, HTTP client, terminal and scanner I/O.

pub mod clients;
pub mod display;
pub mod protocol;
pub mod qr;
pub mod scanner;
