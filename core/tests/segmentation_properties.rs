//! End-to-end segmentation behaviour over a small CEDICT-style dictionary.

use cedict_core::{tokenize, DictionaryIndex, Segmenter, Token};
use std::sync::Arc;

const CEDICT: &str = "\
# CC-CEDICT
# sample subset
你 你 [ni3] /you/
好 好 [hao3] /good/
你好 你好 [ni3 hao3] /hello/
我 我 [wo3] /I/
們 们 [men5] /plural marker/
我們 我们 [wo3 men5] /we/
學 学 [xue2] /to learn/
學生 学生 [xue2 sheng5] /student/
生 生 [sheng1] /to be born/
中國 中国 [Zhong1 guo2] /China/
中國人 中国人 [Zhong1 guo2 ren2] /Chinese person/
人 人 [ren2] /person/
乾 干 [gan1] /dry/
乾 乾 [qian2] /surname Qian/
國 国 [guo2] /country/
書 书 [shu1] /book/
綠 绿 [lu:4] /green/
";

fn index() -> DictionaryIndex {
    DictionaryIndex::build(CEDICT)
}

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

#[test]
fn hello_is_one_token_with_one_match() {
    let tokens = tokenize("你好", &index());
    assert_eq!(tokens.len(), 1);
    let t = &tokens[0];
    assert_eq!(t.text, "你好");
    assert_eq!(t.simplified, "你好");
    assert_eq!(t.traditional, "你好");
    assert_eq!(t.matches.len(), 1);
    assert_eq!(t.matches[0].pinyin_pretty, "nǐ hǎo");
    assert_eq!(t.matches[0].pinyin_raw, "ni3 hao3");
    assert_eq!(t.matches[0].gloss, "hello");
}

#[test]
fn latin_prefix_becomes_one_unknown_token() {
    let tokens = tokenize("abc你好", &index());
    assert_eq!(texts(&tokens), vec!["abc", "你好"]);
    assert!(!tokens[0].is_known());
    assert_eq!(tokens[1].position.offset, 3);
}

#[test]
fn partition_is_lossless() {
    let idx = index();
    let samples = [
        "",
        "你好",
        "我們是學生。",
        "中国人 and 中國人！",
        "line one\nline two\n\n第三行：书",
        "emoji \u{1F600}\u{1F600} 绿色",
        "  leading and trailing  ",
        "（乾）《书》“好”",
    ];
    for sample in samples {
        let tokens = tokenize(sample, &idx);
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, sample, "partition of {sample:?}");
    }
}

#[test]
fn offsets_advance_by_utf16_length() {
    let text = "我們 \u{1F600}x 學生\n中國人，好";
    let tokens = tokenize(text, &index());

    let mut expected = 0;
    for t in &tokens {
        assert_eq!(t.position.offset, expected, "offset of {:?}", t.text);
        expected += utf16_len(&t.text);
    }
    assert_eq!(expected, utf16_len(text));
}

#[test]
fn lines_and_columns_track_newlines() {
    let tokens = tokenize("你好\n我們\n\n人", &index());
    let pos: Vec<(&str, usize, usize)> = tokens
        .iter()
        .map(|t| (t.text.as_str(), t.position.line, t.position.column))
        .collect();
    assert_eq!(
        pos,
        vec![
            ("你好", 1, 1),
            ("\n", 1, 3),
            ("我們", 2, 1),
            ("\n", 2, 3),
            ("\n", 3, 1),
            ("人", 4, 1),
        ]
    );
}

#[test]
fn whitespace_and_punctuation_are_single_tokens() {
    let tokens = tokenize("学生，我们。 \t中国人？", &index());
    assert_eq!(
        texts(&tokens),
        vec!["学生", "，", "我们", "。", " ", "\t", "中国人", "？"]
    );
    for t in &tokens {
        if t.text.chars().any(|c| c.is_whitespace() || "，。？".contains(c)) {
            assert_eq!(t.text.chars().count(), 1, "{:?} absorbed a boundary", t.text);
        }
    }
}

#[test]
fn longest_match_across_scripts() {
    let tokens = tokenize("中國人學生", &index());
    assert_eq!(texts(&tokens), vec!["中國人", "學生"]);
    assert_eq!(tokens[0].simplified, "中国人");
    assert_eq!(tokens[1].simplified, "学生");
    assert_eq!(tokens[1].matches[0].pinyin_pretty, "xué sheng");
}

#[test]
fn u_colon_pinyin_is_rendered() {
    let tokens = tokenize("绿", &index());
    assert_eq!(tokens[0].matches[0].pinyin_raw, "lü4");
    assert_eq!(tokens[0].matches[0].pinyin_pretty, "lǜ");
    assert_eq!(tokens[0].traditional, "綠");
}

fn readings(token: &Token) -> Vec<&str> {
    token.matches.iter().map(|m| m.pinyin_raw.as_str()).collect()
}

#[test]
fn ambiguous_word_with_even_counters_keeps_both_scripts() {
    let tokens = tokenize("乾", &index());
    assert_eq!(readings(&tokens[0]), vec!["qian2", "gan1"]);
}

#[test]
fn preference_biases_toward_less_used_script() {
    let idx = index();

    // 國 is traditional-only: the traditional counter leads, so the
    // simplified reading of 乾 wins.
    let tokens = tokenize("國 乾", &idx);
    assert_eq!(readings(&tokens[2]), vec!["qian2"]);

    // 书 is simplified-only: now the traditional reading wins.
    let tokens = tokenize("书 乾", &idx);
    assert_eq!(readings(&tokens[2]), vec!["gan1", "qian2"]);
    assert_eq!(tokens[2].simplified, "干");

    // One of each: balanced again.
    let tokens = tokenize("國 书 乾", &idx);
    assert_eq!(readings(&tokens[4]), vec!["qian2", "gan1"]);

    // Simplified used more: traditional wins.
    let tokens = tokenize("國 书 书 乾", &idx);
    assert_eq!(readings(&tokens[6]), vec!["gan1", "qian2"]);
}

#[test]
fn multi_scalar_match_reinforces_its_script() {
    // 学生 is found through the simplified trie only.
    let tokens = tokenize("学生乾", &index());
    assert_eq!(texts(&tokens), vec!["学生", "乾"]);
    assert_eq!(readings(&tokens[1]), vec!["gan1", "qian2"]);

    // 你好 is spelled the same in both scripts: resolving it leaves the
    // counters even, and the probe credits traditional, whose candidates
    // are scanned first.
    let tokens = tokenize("你好乾", &index());
    assert_eq!(texts(&tokens), vec!["你好", "乾"]);
    assert_eq!(readings(&tokens[1]), vec!["qian2"]);
}

#[test]
fn equal_length_candidates_go_to_traditional() {
    let idx = DictionaryIndex::build(&format!(
        "{CEDICT}乾杯 干杯 [gan1 bei1] /cheers/\n乾杯 乾杯 [qian2 bei1] /heaven's cup/\n"
    ));
    let tokens = tokenize("乾杯乾", &idx);
    assert_eq!(texts(&tokens), vec!["乾杯", "乾"]);
    assert_eq!(readings(&tokens[0]), vec!["qian2 bei1", "gan1 bei1"]);
    assert_eq!(readings(&tokens[1]), vec!["qian2"]);
}

#[test]
fn counters_do_not_leak_between_calls() {
    let idx = index();
    let _ = tokenize("书 书 书", &idx);
    let tokens = tokenize("乾", &idx);
    assert_eq!(readings(&tokens[0]), vec!["qian2", "gan1"]);
}

#[test]
fn segmenter_is_shareable_across_threads() {
    let seg = Segmenter::new(Arc::new(index()));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let seg = seg.clone();
            std::thread::spawn(move || seg.tokenize("我們是學生"))
        })
        .collect();
    let first = seg.tokenize("我們是學生");
    for h in handles {
        assert_eq!(h.join().unwrap(), first);
    }
    assert_eq!(texts(&first), vec!["我們", "是", "學生"]);
}

#[test]
fn completion_words_skip_separators() {
    let seg = Segmenter::new(Arc::new(index()));
    assert_eq!(seg.words("你好， 学生!"), vec!["你好", "学生", "!"]);
}

#[test]
fn token_serializes_with_camel_case_matches() {
    let tokens = tokenize("好", &index());
    let json = serde_json::to_value(&tokens[0]).unwrap();
    assert_eq!(json["text"], "好");
    assert_eq!(json["position"]["offset"], 0);
    assert_eq!(json["position"]["line"], 1);
    assert_eq!(json["matches"][0]["pinyinPretty"], "hǎo");
    assert_eq!(json["matches"][0]["pinyinRaw"], "hao3");
    assert_eq!(json["matches"][0]["gloss"], "good");
}
