//calculates maximum drawdown as a fraction of the running peak
//periods before the series first turns positive are ignored
pub fn max_drawdown(values: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0;

    for &value in values {
        if value > peak {
            peak = value;
        }

        if peak > 0.0 {
            let drawdown = (peak - value) / peak;
            if drawdown > worst {
                worst = drawdown;
            }
        }
    }

    worst
}

//calculates period-over-period returns, skipping periods with a non-positive base
pub fn period_returns(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .filter(|w| w[0] > 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

//return relative to the starting amount
pub fn total_return(final_value: f64, initial: f64) -> f64 {
    if initial > 0.0 {
        final_value / initial - 1.0
    } else {
        0.0
    }
}
