pub mod init;
pub mod layers;
pub mod losses;
pub mod module;
pub mod parameter;
pub mod sequential;

pub use layers::{Linear, LogSoftmax, Relu};
pub use losses::NllLoss;
pub use module::Module;
pub use parameter::Parameter;
pub use sequential::Sequential;
