use super::*;

#[test]
fn final_frame_is_target_for_any_length() {
    for text in ["", "a", "hi there", "scroll orchestration"] {
        let frames: Vec<String> = Scrambler::new(text, ScrambleConfig::classic())
            .unwrap()
            .collect();
        assert_eq!(frames.last().map(String::as_str), Some(text));
    }
}

#[test]
fn frame_count_follows_duration_speed_and_fps() {
    let s = Scrambler::new("abc", ScrambleConfig::classic()).unwrap();
    assert_eq!(s.total_frames(), 90);
    assert_eq!(s.count(), 91);

    let cfg = ScrambleConfig {
        speed: 2.0,
        ..ScrambleConfig::wave()
    };
    assert_eq!(cfg.total_frames(), 45);
}

#[test]
fn first_frame_is_fully_scrambled() {
    let mut s = Scrambler::new("hello", ScrambleConfig::classic()).unwrap();
    let first = s.next_frame().unwrap();
    assert_eq!(first.chars().count(), 5);
    assert!(first.chars().all(|c| CLASSIC_ALPHABET.contains(c)));
}

#[test]
fn revealed_characters_never_rescramble() {
    // Lowercase never appears in the decoy alphabet, so a match means a reveal.
    let target: Vec<char> = "lowercase".chars().collect();
    let frames: Vec<Vec<char>> = Scrambler::new("lowercase", ScrambleConfig::classic())
        .unwrap()
        .map(|f| f.chars().collect())
        .collect();
    for i in 0..target.len() {
        let first = frames
            .iter()
            .position(|f| f[i] == target[i])
            .expect("every character is revealed");
        assert!(frames[first..].iter().all(|f| f[i] == target[i]));
    }
}

#[test]
fn earlier_characters_reveal_first() {
    let target: Vec<char> = "abcdefgh".chars().collect();
    let frames: Vec<Vec<char>> = Scrambler::new("abcdefgh", ScrambleConfig::classic())
        .unwrap()
        .map(|f| f.chars().collect())
        .collect();
    let reveal: Vec<usize> = (0..target.len())
        .map(|i| {
            frames
                .iter()
                .position(|f| f[i] == target[i])
                .unwrap_or(usize::MAX)
        })
        .collect();
    assert!(reveal.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn whitespace_is_never_scrambled() {
    for frame in Scrambler::new("a b\tc", ScrambleConfig::wave()).unwrap() {
        let chars: Vec<char> = frame.chars().collect();
        assert_eq!(chars[1], ' ');
        assert_eq!(chars[3], '\t');
    }
}

#[test]
fn same_seed_same_frames() {
    let a: Vec<String> = Scrambler::new("repeatable", ScrambleConfig::wave().seed(7))
        .unwrap()
        .collect();
    let b: Vec<String> = Scrambler::new("repeatable", ScrambleConfig::wave().seed(7))
        .unwrap()
        .collect();
    let c: Vec<String> = Scrambler::new("repeatable", ScrambleConfig::wave().seed(8))
        .unwrap()
        .collect();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn zero_duration_shows_target_immediately() {
    let cfg = ScrambleConfig {
        duration: 0.0,
        ..ScrambleConfig::classic()
    };
    let mut s = Scrambler::new("done", cfg).unwrap();
    assert_eq!(s.next_frame().as_deref(), Some("done"));
    assert!(s.is_finished());
    assert_eq!(s.next_frame(), None);
}

#[test]
fn invalid_configs_are_rejected() {
    let empty = ScrambleConfig {
        alphabet: String::new(),
        ..ScrambleConfig::classic()
    };
    assert!(Scrambler::new("x", empty).is_err());
    let stalled = ScrambleConfig {
        speed: 0.0,
        ..ScrambleConfig::classic()
    };
    assert!(stalled.validate().is_err());
}
