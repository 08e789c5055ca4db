use std::fmt::Write as _;

use crate::rubric::RUBRIC;

pub const DATA_OPEN: &str = "[DATA]";
pub const DATA_CLOSE: &str = "[END_DATA]";
pub const COMMENTARY_MARKER: &str = "[講評]";

/// Builds the judging instruction for two candidate words.
///
/// Words come from the closed vocabulary, so they are substituted as-is.
pub fn build_prompt(word_a: &str, word_b: &str) -> String {
    let mut rubric = String::new();
    for (i, dim) in RUBRIC.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = writeln!(
            rubric,
            "{}. {} (重み {}%): {}",
            i + 1,
            dim.label,
            dim.weight,
            dim.description
        );
    }
    let axis_order = RUBRIC
        .iter()
        .map(|d| d.label)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "あなたは論理的かつ厳格な造語審議委員会の審査員です。\n\
         2人のプレイヤーが作成した新しい四字熟語を分析し、採点してください。\n\
         \n\
         【プレイヤーAの作品】\n\
         「{word_a}」\n\
         \n\
         【プレイヤーBの作品】\n\
         「{word_b}」\n\
         \n\
         【採点ロジック】\n\
         以下の{count}項目をそれぞれ0〜100の整数で評価してください。\n\
         {rubric}\
         \n\
         【出力フォーマット】\n\
         必ず次の形式で出力してください。数値は上の項目順 ({axis_order}) にカンマ区切りで5つ並べます。\n\
         見出し記号(#)や区切り線(--- や ===)は使用禁止です。\n\
         \n\
         {DATA_OPEN}\n\
         A: n,n,n,n,n\n\
         B: n,n,n,n,n\n\
         {DATA_CLOSE}\n\
         {COMMENTARY_MARKER}\n\
         プレイヤーAの得点理由、プレイヤーBの得点理由、勝者とその決め手を、\n\
         語句の構成や対比効果に触れながら理論的に解説してください。\n",
        count = RUBRIC.len(),
    )
}
