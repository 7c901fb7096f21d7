use std::fs;
use std::process::Command;

use pretty_assertions::assert_eq;
use seqtrie::corpus::{Corpus, REGIONAL_INDICATORS};
use seqtrie::emit::{render, EmitOptions};
use seqtrie::output::write_if_changed;
use seqtrie::trie::builder::DEFAULT_MAX_LEN;

const EMOJI_TEST: &str = "\
# emoji-test.txt
# Version: 17.0
#
# group: Smileys & Emotion
1F600                                                  ; fully-qualified     # 😀 E1.0 grinning face
263A FE0F                                              ; fully-qualified     # ☺️ E0.6 smiling face
2764 FE0F 200D 1F525                                   ; fully-qualified     # ❤️‍🔥 E13.1 heart on fire
2764 200D 1F525                                        ; unqualified         # ❤‍🔥 E13.1 heart on fire
# group: People & Body
1F44B 1F3FB                                            ; fully-qualified     # 👋🏻 E1.0 waving hand: light skin tone
1F44B 1F3FC                                            ; fully-qualified     # 👋🏼 E1.0 waving hand: medium-light skin tone
1F91A 1F3FB                                            ; fully-qualified     # 🤚🏻 E3.0 raised back of hand: light skin tone
1F91A 1F3FC                                            ; fully-qualified     # 🤚🏼 E3.0 raised back of hand: medium-light skin tone
1F469 200D 1F4BB                                       ; fully-qualified     # 👩‍💻 E4.0 woman technologist
1F468 200D 1F4BB                                       ; fully-qualified     # 👨‍💻 E4.0 man technologist
1F3C3 200D 2640 FE0F                                   ; fully-qualified     # 🏃‍♀️ E4.0 woman running
1F3C3 200D 2640                                        ; minimally-qualified # 🏃‍♀ E4.0 woman running
0023 FE0F 20E3                                         ; fully-qualified     # #️⃣ E0.6 keycap: #
# group: Flags
1F1FA 1F1F8                                            ; fully-qualified     # 🇺🇸 E0.6 flag: United States
1F3F4 E0067 E0062 E0065 E006E E0067 E007F              ; fully-qualified     # 🏴 E5.0 flag: England
this line is garbage
";

fn automaton() -> (Corpus, seqtrie::Automaton<u32>) {
    let corpus = Corpus::parse_str(EMOJI_TEST);
    let automaton = corpus.build_automaton(DEFAULT_MAX_LEN).unwrap();
    (corpus, automaton)
}

#[test]
fn every_sequence_and_prefix_is_recognized() {
    let (corpus, automaton) = automaton();
    assert_eq!(corpus.sequences().len(), 13);
    assert_eq!(corpus.skipped_lines(), 1);
    for sequence in corpus.sequences() {
        for len in 1..=sequence.len() {
            assert!(automaton.accepts_prefix(&sequence[..len]), "{sequence:X?}[..{len}]");
        }
    }
}

#[test]
fn all_flag_pairs_are_recognized() {
    let (_, automaton) = automaton();
    for a in REGIONAL_INDICATORS {
        for b in REGIONAL_INDICATORS {
            assert!(automaton.accepts_prefix([a, b]));
        }
    }
}

#[test]
fn unrelated_symbols_fail_immediately() {
    let (_, automaton) = automaton();
    for symbol in [0x41u32, 0x1F600, 0x1F3F4, 0x200D, 0xFE0F] {
        assert_eq!(automaton.step(automaton.root(), symbol), None, "{symbol:X}");
    }
    assert!(!automaton.is_prefix_extension([0x1F44Bu32], 0x1F3FD));
    assert!(automaton.is_prefix_extension([0x2764u32, 0xFE0F], 0x200D));
}

#[test]
fn result_is_minimal_and_fully_reachable() {
    let (_, automaton) = automaton();
    assert!(automaton.is_minimal());
    assert_eq!(automaton.reachable_count(), automaton.node_count());

    let mut again = automaton.clone();
    assert!(!again.minimize());
    assert_eq!(again, automaton);
}

#[test]
fn equivalent_sequences_share_nodes() {
    let (_, automaton) = automaton();
    // Both hands accept the same skin tones.
    assert_eq!(automaton.walk([0x1F44Bu32]), automaton.walk([0x1F91Au32]));
    // Both technologists continue the same way.
    assert_eq!(automaton.walk([0x1F469u32]), automaton.walk([0x1F468u32]));
}

#[test]
fn rendering_is_deterministic() {
    let (corpus, automaton) = automaton();
    let first = render(&EmitOptions::default(), &automaton, &corpus);
    let (corpus, automaton) = self::automaton();
    let second = render(&EmitOptions::default(), &automaton, &corpus);
    assert_eq!(first, second);
    assert!(first.contains("/* Source file version: 17.0 */"));
    assert!(first.contains("  case 0x1F1E6 ... 0x1F1FF /* 26 */:"));
}

#[test]
fn combining_predicate_lists_non_initial_symbols() {
    let (corpus, automaton) = automaton();
    let header = render(&EmitOptions::default(), &automaton, &corpus);
    let combining = header
        .split("bool is_emoji_combining (gunichar c)")
        .nth(1)
        .and_then(|rest| rest.split("bool is_single_width_emoji_combining").next())
        .unwrap();
    for label in ["0x200D", "0x20E3", "0xFE0F", "0x1F3FB ... 0x1F3FC", "0x1F525", "0x2640"] {
        assert!(combining.contains(&format!("  case {label}:")), "{label}");
    }
    assert!(!combining.contains("0xE0067"));
}

#[test]
fn regeneration_with_unchanged_input_does_not_rewrite() {
    let (corpus, automaton) = automaton();
    let header = render(&EmitOptions::default(), &automaton, &corpus);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("emoji-table-incl.hh");
    assert!(write_if_changed(&path, &header).unwrap());
    assert!(!write_if_changed(&path, &header).unwrap());
}

#[test]
fn cli_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("emoji-test.txt");
    let output = dir.path().join("emoji-table-incl.hh");
    fs::write(&input, EMOJI_TEST).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_emoji-generate"))
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let (corpus, automaton) = automaton();
    let expected = render(&EmitOptions::default(), &automaton, &corpus);
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
}

#[test]
fn cli_fails_on_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_emoji-generate"))
        .arg(dir.path().join("missing.txt"))
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn cli_fails_on_too_short_limit() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("emoji-test.txt");
    fs::write(&input, EMOJI_TEST).unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_emoji-generate"))
        .arg(&input)
        .args(["--max-length", "3"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("exceeds the limit of 3"));
}
