/// Format a kilobyte count with two decimals: "2.04 GB", "512.00 MB", "12.00 kB".
pub fn fmt_kb(kb: u64) -> String {
    const GB: f64 = 1_048_576.0;
    const MB: f64 = 1_024.0;
    let k = kb as f64;
    if k >= GB      { format!("{:.2} GB", k / GB) }
    else if k >= MB { format!("{:.2} MB", k / MB) }
    else            { format!("{:.2} kB", k) }
}
