mod generate;
mod info;
mod serve;

pub use generate::GenerateArgs;
pub use generate::generate;
pub use info::info;
pub use serve::serve;
