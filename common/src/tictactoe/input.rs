// Stands in for any line that is not a decimal integer. Always off the board,
// so it is rejected the same way as an occupied cell.
pub const INVALID_POSITION: i32 = -1;

pub fn parse_move(line: &str) -> i32 {
    line.trim().parse::<i32>().unwrap_or(INVALID_POSITION)
}
