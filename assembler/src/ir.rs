
// A single source line, split into its mnemonic and (still textual) operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub mnemonic: String,
    pub operands: Vec<String>,
}

impl Stmt {
    pub fn new(mnemonic: String, operands: Vec<String>) -> Stmt {
        Stmt { mnemonic, operands }
    }
}
