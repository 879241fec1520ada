use crate::Grid;

/// Draws the grid in a box, with row indices on the left and column indices on top.
///
/// ```text
///      0 1 2
///    ╭───────╮
///  0 │ X . . │
///  1 │ . O . │
///  2 │ . . . │
///    ╰───────╯
/// ```
impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.size();
        // Wide enough for the largest index
        let w = (size - 1).to_string().len();

        // Draw the top of the box
        write!(f, "{:w$}  ", "")?;
        for col in 0..size {
            write!(f, " {:>w$}", col)?;
        }
        writeln!(f)?;
        writeln!(f, "{:w$} ╭{}╮", "", "─".repeat(size * (w + 1) + 1))?;

        for row in 0..size {
            write!(f, "{:>w$} │", row)?;
            for col in 0..size {
                let c = self.at(row, col).map_or('.', |mark| mark.as_char());
                write!(f, " {:>w$}", c)?;
            }
            writeln!(f, " │")?;
        }

        // Draw the bottom of the box
        write!(f, "{:w$} ╰{}╯", "", "─".repeat(size * (w + 1) + 1))
    }
}
