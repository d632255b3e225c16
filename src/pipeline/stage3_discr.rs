use crate::model::options::DiscrOptions;
use crate::model::scores::Discriminability;

/// Averages reliability scores into one discriminability value.
///
/// NaN entries are counted as no-repeat scans and never averaged. With
/// `remove_outliers`, scores at or below `threshold` are dropped and counted as
/// outliers. An empty averaging set yields NaN.
pub fn compute_discriminability(scores: &[f64], options: &DiscrOptions) -> Discriminability {
    let mut n_unique = 0usize;
    let mut n_outliers = 0usize;
    let mut n_used = 0usize;
    let mut sum = 0f64;

    for &s in scores {
        if s.is_nan() {
            n_unique += 1;
            continue;
        }
        if options.remove_outliers && s <= options.threshold {
            n_outliers += 1;
            continue;
        }
        sum += s;
        n_used += 1;
    }

    let score = if n_used == 0 {
        f64::NAN
    } else {
        sum / n_used as f64
    };

    if options.verbose {
        crate::info!("{} outliers removed", n_outliers);
        crate::info!("{} scans with unique ids removed", n_unique);
        crate::info!("{} reliability scores used", n_used);
        crate::info!("discriminability: {}", score);
    }

    Discriminability {
        score,
        n_used,
        n_outliers,
        n_unique,
    }
}

pub fn discr_stat(scores: &[f64], options: &DiscrOptions) -> f64 {
    compute_discriminability(scores, options).score
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_discr.rs"]
mod tests;
