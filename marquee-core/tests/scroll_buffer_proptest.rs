//! Property-based tests for scroll buffer addressing and text compilation.

use marquee_core::glyph::{Glyph, GLYPH_TABLE};
use marquee_core::text::encode_text;
use marquee_core::{ScrollBuffer, BUFFER_CAPACITY};

fn filled(len: usize) -> ScrollBuffer {
    let mut buf = ScrollBuffer::new();
    for i in 0..len {
        buf.append(Glyph::from_bits(i as u8)).unwrap();
    }
    buf
}

proptest::proptest! {
    /// advance is the successor modulo the buffer length.
    #[test]
    fn advance_is_successor_mod_len(len in 1usize..=BUFFER_CAPACITY, seed in 0usize..BUFFER_CAPACITY) {
        let buf = filled(len);
        let i = seed % len;
        assert_eq!(buf.advance(i), (i + 1) % len);
        assert_eq!(buf.take_bounds_violations(), 0);
    }

    /// Indices past the end come back unchanged and are counted.
    #[test]
    fn advance_out_of_range_is_noop(len in 1usize..=BUFFER_CAPACITY, over in 0usize..1000) {
        let buf = filled(len);
        let i = len + over;
        assert_eq!(buf.advance(i), i);
        assert_eq!(buf.take_bounds_violations(), 1);
    }

    /// Walking the cursor len times returns it to the start.
    #[test]
    fn cursor_cycle_length(len in 1usize..=BUFFER_CAPACITY) {
        let mut buf = filled(len);
        for _ in 0..len {
            buf.advance_cursor();
            assert!(buf.cursor() < len);
        }
        assert_eq!(buf.cursor(), 0);
    }

    /// The visible window reads the buffer circularly from the cursor.
    #[test]
    fn window_is_circular(len in 1usize..=BUFFER_CAPACITY, steps in 0usize..300) {
        let mut buf = filled(len);
        for _ in 0..steps {
            buf.advance_cursor();
        }
        let window = buf.window();
        for (k, glyph) in window.iter().enumerate() {
            let expected = ((steps + k) % len) as u8;
            assert_eq!(glyph.bits(), expected);
        }
    }

    /// Appends past capacity never change stored glyphs.
    #[test]
    fn full_buffer_rejects(extra in 1usize..50) {
        let mut buf = filled(BUFFER_CAPACITY);
        for _ in 0..extra {
            assert!(buf.append(Glyph::from_bits(0xFF)).is_err());
        }
        assert_eq!(buf.len(), BUFFER_CAPACITY);
        assert_eq!(buf.get(BUFFER_CAPACITY - 1).bits(), (BUFFER_CAPACITY - 1) as u8);
    }

    /// Dot-free text of supported characters compiles one glyph per char.
    #[test]
    fn supported_text_maps_one_to_one(picks in proptest::collection::vec(0usize..GLYPH_TABLE.len(), 0..BUFFER_CAPACITY)) {
        let text: String = picks.iter().map(|&i| GLYPH_TABLE[i].0).collect();
        let mut buf = ScrollBuffer::new();
        let report = encode_text(&text, &mut buf);

        assert!(report.is_clean());
        assert_eq!(report.glyphs, picks.len());
        for (slot, &i) in picks.iter().enumerate() {
            assert_eq!(buf.get(slot).bits(), GLYPH_TABLE[i].1);
        }
    }

    /// Compiling arbitrary text never overflows and leaves a valid cursor.
    #[test]
    fn arbitrary_text_is_bounded(text in ".{0,300}") {
        let mut buf = ScrollBuffer::new();
        let report = encode_text(&text, &mut buf);
        assert!(report.glyphs <= BUFFER_CAPACITY);
        assert_eq!(report.glyphs, buf.len());
        assert_eq!(buf.cursor(), 0);
    }
}
