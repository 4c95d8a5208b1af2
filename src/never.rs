/// Stand-in for the unstable `!` type, so `inner_main` can return `Result<Never>`: the only way
/// out is the error.
#[derive(Debug)]
pub enum Never {}
