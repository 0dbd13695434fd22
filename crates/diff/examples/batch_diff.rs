use anyhow::Result;
use text_diff::TextDiff;

fn main() -> Result<()> {
    env_logger::init();

    // Several revisions of one file, diffed pairwise in parallel
    let revisions: Vec<String> = (0..8)
        .map(|rev| {
            (0..200)
                .map(|line| {
                    if line % 25 == rev {
                        format!("line {line} edited in revision {rev}\n")
                    } else {
                        format!("line {line}\n")
                    }
                })
                .collect()
        })
        .collect();

    let pairs: Vec<(&str, &str)> = revisions
        .windows(2)
        .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        .collect();

    let results = TextDiff::configure().context_lines(1).diff_batch(&pairs);

    for (i, (result, (old, new))) in results.iter().zip(&pairs).enumerate() {
        let stats = result.stats();
        println!(
            "revision {} -> {}: {} hunks, +{} -{} ={}",
            i,
            i + 1,
            result.hunk_count(),
            stats.added,
            stats.removed,
            stats.unchanged
        );
        assert_eq!(&result.apply(old)?, new);
    }

    Ok(())
}
