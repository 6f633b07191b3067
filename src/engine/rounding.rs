//4 decimal places kept on every emitted value
const SCALE: f64 = 10_000.0;

//rounds to 4 decimal places, half away from zero on the magnitude
//f64::round already breaks ties away from zero, so a tie like 0.5 goes to 1 (never banker's)
//values that round to zero come back as +0.0
pub fn rounded(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }

    let magnitude = (x.abs() * SCALE).round() / SCALE;
    if magnitude == 0.0 {
        0.0
    } else {
        x.signum() * magnitude
    }
}
