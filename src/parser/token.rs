use super::coord::InputCoord;

/// A kind of token
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum TKind {
    /// The `$$` delimiter that brackets a query
    Delim,

    /// Identifiers: `p`, `fox`, `agent_007`
    Ident,

    /// Keyword `NOT`
    Not,

    /// Keyword `AND`
    And,

    /// Keyword `OR`
    Or,

    /// Keyword `IMPLIES`
    Implies,

    /// `(`
    LPar,

    /// `)`
    RPar,

    /// Any illegal symbol
    Illegal,
}

/// A token
#[derive(Clone, Debug)]
pub struct Token {
    /// The kind of token
    pub kind: TKind,

    /// The token text
    pub text: String,

    /// The coordinate at the start of the token
    pub from: InputCoord,

    /// The coordinate at the end of the token
    pub to: InputCoord,
}
