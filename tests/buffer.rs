use rope_buffer::*;

#[test]
fn test_construct_round_trip() {
    let inputs = [
        "",
        "a",
        "hello",
        "The quick brown fox jumps over the lazy dog",
        "line1\nline2\nline3",
    ];

    for input in inputs {
        let buffer = Buffer::from(input);
        assert_eq!(buffer.to_bytes(), input.as_bytes());
        assert_eq!(buffer.len(), input.len());
        assert!(buffer.validate().is_ok());
    }
}

#[test]
fn test_empty_buffer() {
    let buffer = Buffer::from("");
    assert_eq!(buffer.len(), 0);
    assert!(buffer.is_empty());
    assert_eq!(buffer.to_bytes(), b"");
    assert_eq!(buffer.depth(), 0);
    assert_eq!(buffer.leaf_count(), 0);
    assert_eq!(buffer, Buffer::new());
}

#[test]
fn test_insert() {
    let cases = [
        ("world", 0, "hello ", "hello world"),
        ("hello", 5, " world", "hello world"),
        ("helo", 3, "l", "hello"),
        ("", 0, "hello", "hello"),
    ];

    for (initial, pos, text, expected) in cases {
        let buffer = Buffer::from(initial);
        let edited = buffer.insert(pos, text).expect("in range");
        assert_eq!(edited.to_text().expect("utf8"), expected);
        // Original is untouched
        assert_eq!(buffer.to_text().expect("utf8"), initial);
    }
}

#[test]
fn test_delete() {
    let cases = [
        ("hello world", 0, 6, "world"),
        ("hello world", 5, 11, "hello"),
        ("hello world", 5, 6, "helloworld"),
        ("hello", 0, 5, ""),
        ("hello", 2, 2, "hello"),
    ];

    for (initial, start, end, expected) in cases {
        let buffer = Buffer::from(initial);
        let edited = buffer.delete(start, end).expect("in range");
        assert_eq!(edited.to_text().expect("utf8"), expected);
        assert_eq!(buffer.to_text().expect("utf8"), initial);
    }
}

#[test]
fn test_delete_all_is_empty() {
    let buffer = Buffer::from("hello").delete(0, 5).expect("in range");
    assert!(buffer.is_empty());
    assert_eq!(buffer.line_count(), 1);
}

#[test]
fn test_out_of_range_errors() {
    let buffer = Buffer::from("hello");

    assert_eq!(
        buffer.insert(6, "x").unwrap_err(),
        RangeError::Position { pos: 6, len: 5 }
    );
    assert_eq!(
        buffer.delete(3, 2).unwrap_err(),
        RangeError::Range {
            start: 3,
            end: 2,
            len: 5
        }
    );
    assert_eq!(
        buffer.delete(0, 6).unwrap_err(),
        RangeError::Range {
            start: 0,
            end: 6,
            len: 5
        }
    );
    assert!(buffer.replace(4, 9, "x").is_err());
    assert!(buffer.slice(2, 10).is_err());
    assert!(buffer.split_at(6).is_err());

    // Failed calls leave the buffer as it was
    assert_eq!(buffer.to_bytes(), b"hello");
}

#[test]
fn test_range_error_messages() {
    let err = Buffer::from("abc").insert(9, "x").unwrap_err();
    assert_eq!(err.to_string(), "position 9 is outside buffer of length 3");

    let err = Buffer::from("abc").delete(2, 1).unwrap_err();
    assert_eq!(err.to_string(), "range 2..1 is invalid for buffer of length 3");
}

#[test]
fn test_long_string_is_chunked() {
    let text = "a".repeat(2000);
    let buffer = Buffer::from(text.as_str());

    assert!(buffer.leaf_count() > 1);
    assert_eq!(buffer.to_bytes(), text.as_bytes());
    assert_eq!(buffer.len(), 2000);
    assert!(buffer.validate().is_ok());

    let text = "abcdefghij".repeat(150);
    let buffer = Buffer::from(text.as_str());
    assert_eq!(buffer.to_text().expect("utf8"), text);
}

#[test]
fn test_custom_chunk_threshold() {
    let config = RopeConfig::new(16, 2).expect("valid config");
    let text = "0123456789".repeat(10);
    let buffer = Buffer::with_config(text.as_str(), config);

    assert_eq!(buffer.leaf_count(), 7);
    assert!(buffer.chunks().all(|chunk| chunk.len() <= 16));

    // Derived buffers keep the config
    let edited = buffer.insert(50, "x".repeat(40)).expect("in range");
    assert_eq!(edited.config(), &config);
    assert!(edited.chunks().all(|chunk| chunk.len() <= 16));
    assert!(edited.validate().is_ok());
}

#[test]
fn test_replace() {
    let buffer = Buffer::from("hello world");
    let edited = buffer.replace(6, 11, "rope").expect("in range");
    assert_eq!(edited.to_text().expect("utf8"), "hello rope");

    let edited = buffer.replace(0, 0, ">> ").expect("in range");
    assert_eq!(edited.to_text().expect("utf8"), ">> hello world");

    let edited = buffer.replace(0, 11, "").expect("in range");
    assert!(edited.is_empty());
}

#[test]
fn test_slice_and_byte_at() {
    let text = "0123456789".repeat(300);
    let buffer = Buffer::from(text.as_str());

    assert_eq!(buffer.slice(0, 0).expect("in range"), b"");
    assert_eq!(buffer.slice(995, 1012).expect("in range"), &text.as_bytes()[995..1012]);
    assert_eq!(buffer.slice(0, text.len()).expect("in range"), text.as_bytes());

    assert_eq!(buffer.byte_at(0), Some(b'0'));
    assert_eq!(buffer.byte_at(1503), Some(b'3'));
    assert_eq!(buffer.byte_at(text.len()), None);
    assert_eq!(Buffer::new().byte_at(0), None);
}

#[test]
fn test_split_at_and_append() {
    let buffer = Buffer::from("hello world");
    let (left, right) = buffer.split_at(5).expect("in range");
    assert_eq!(left.to_bytes(), b"hello");
    assert_eq!(right.to_bytes(), b" world");
    assert_eq!(left.len() + right.len(), buffer.len());

    let joined = left.append(&right);
    assert_eq!(joined, buffer);
    assert_eq!(joined.len(), left.len() + right.len());

    let (empty, all) = buffer.split_at(0).expect("in range");
    assert!(empty.is_empty());
    assert_eq!(all, buffer);
    assert_eq!(empty.append(&all), buffer);
}

#[test]
fn test_apply_edits() {
    let buffer = Buffer::from("fn main() {}");
    let edits = [
        Edit::insert(11, "\n    println!(\"hi\");\n"),
        Edit::replace(3..7, "start"),
        Edit::delete(0..3),
    ];

    let edited = buffer.apply_all(&edits).expect("valid edits");
    assert_eq!(
        edited.to_text().expect("utf8"),
        "start() {\n    println!(\"hi\");\n}"
    );

    let expected_len = edits
        .iter()
        .fold(buffer.len() as isize, |len, edit| len + edit.len_delta());
    assert_eq!(edited.len() as isize, expected_len);

    assert!(buffer.apply(&Edit::delete(4..100)).is_err());
    assert!(buffer.apply_all(&[Edit::insert(0, "x"), Edit::insert(99, "y")]).is_err());
}

#[test]
fn test_typing_simulation() {
    let mut buffer = Buffer::new();
    for (i, ch) in "Hello, World!".chars().enumerate() {
        buffer = buffer.insert(i, ch.to_string()).expect("in range");
    }
    assert_eq!(buffer.to_text().expect("utf8"), "Hello, World!");
    assert_eq!(buffer.len(), 13);
    assert!(buffer.validate().is_ok());
}

#[test]
fn test_versions_are_independent() {
    let v0 = Buffer::from("base");
    let v1 = v0.insert(4, " one").expect("in range");
    let v2 = v0.insert(0, "two ").expect("in range");
    let v3 = v1.delete(0, 4).expect("in range");

    assert_eq!(v0.to_bytes(), b"base");
    assert_eq!(v1.to_bytes(), b"base one");
    assert_eq!(v2.to_bytes(), b"two base");
    assert_eq!(v3.to_bytes(), b" one");
}

#[test]
fn test_repeated_front_insert_stays_shallow() {
    let mut buffer = Buffer::new();
    for i in 0..2000 {
        buffer = buffer.insert(0, [b'a' + (i % 26) as u8]).expect("in range");
        assert!(buffer.depth() <= buffer.config().max_height(buffer.len()));
    }
    assert_eq!(buffer.len(), 2000);
    assert!(buffer.validate().is_ok());
}

#[test]
fn test_repeated_back_insert_stays_shallow() {
    let mut buffer = Buffer::new();
    for _ in 0..2000 {
        buffer = buffer.insert(buffer.len(), "z").expect("in range");
    }
    assert!(buffer.depth() <= RopeConfig::default().max_height(2000));
    assert!(buffer.validate().is_ok());
}

#[test]
fn test_mid_sequence_split_is_not_adjusted() {
    // Byte offsets are not snapped to character boundaries. Splitting "é"
    // (0xC3 0xA9) between its bytes is allowed; the halves are not valid UTF-8.
    let buffer = Buffer::from("é");
    let (left, right) = buffer.split_at(1).expect("in range");
    assert_eq!(left.to_bytes(), vec![0xC3]);
    assert_eq!(right.to_bytes(), vec![0xA9]);
    assert!(left.to_text().is_err());

    let edited = buffer.insert(1, "x").expect("in range");
    assert_eq!(edited.to_bytes(), vec![0xC3, b'x', 0xA9]);
    assert!(edited.to_text().is_err());

    // Putting the bytes back together restores valid text
    assert_eq!(left.append(&right).to_text().expect("utf8"), "é");
}

#[test]
fn test_display_is_lossy() {
    let buffer = Buffer::from(&[b'o', b'k', 0xFF][..]);
    assert_eq!(buffer.to_string(), "ok\u{FFFD}");
    assert_eq!(Buffer::from("plain").to_string(), "plain");
}

#[test]
fn test_equality_ignores_shape() {
    let config = RopeConfig::new(3, 2).expect("valid config");
    let chunked = Buffer::with_config("abcdefghij", config);
    let single = Buffer::from("abcdefghij");
    assert!(chunked.leaf_count() > single.leaf_count());
    assert_eq!(chunked, single);
    assert_ne!(single, Buffer::from("abcdefghik"));
    assert_ne!(single, Buffer::from("abcdefghi"));
}

#[test]
fn test_snapshots_shared_across_threads() {
    let base = Buffer::from("shared\n".repeat(500).as_str());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let base = base.clone();
            std::thread::spawn(move || {
                let edited = base.insert(i * 7, format!("thread {}\n", i)).expect("in range");
                assert!(edited.validate().is_ok());
                (edited.line_count(), base.line_count())
            })
        })
        .collect();

    for handle in handles {
        let (edited_lines, base_lines) = handle.join().expect("thread finished");
        assert_eq!(edited_lines, base_lines + 1);
    }
    assert_eq!(base.len(), 7 * 500);
}
