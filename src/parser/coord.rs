/// A coordinate in the input.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct InputCoord {
    /// The character index, starting at 0 and increasing with each character read
    pub pos: usize,

    /// The line number, starting at 1 and increasing with each new line
    pub line: usize,

    /// The column number, starting at 1 and increasing with each character read, resetting to 1 when [line](Self::line) increases
    pub col: usize,
}

impl InputCoord {
    /// Starting input coord.
    pub fn new() -> Self {
        Self {
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Count a new line
    pub fn newline(&mut self) {
        self.pos += 1;
        self.line += 1;
        self.col = 1;
    }

    /// Count a non-newline
    pub fn advance(&mut self) {
        self.pos += 1;
        self.col += 1;
    }
}

impl Default for InputCoord {
    fn default() -> Self {
        Self::new()
    }
}
