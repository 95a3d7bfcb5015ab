use crate::channel::{Channel, Transmission};
use crate::frame::Bits;
use crate::journal::Journal;

fn frame() -> Bits {
    Bits::from_pattern("110100111011001").expect("valid pattern")
}

fn bit_diff(a: &Bits, b: &Bits) -> usize {
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .filter(|(x, y)| x != y)
        .count()
}

#[test]
fn loss_probability_one_always_loses() {
    let mut channel = Channel::new(1.0, false, 1);
    let mut journal = Journal::default();
    for _ in 0..50 {
        assert_eq!(
            channel.transmit(frame(), &mut journal),
            Transmission::Lost
        );
    }
    assert!(journal.contains("Channel", "Frame lost in transit"));
}

#[test]
fn zero_loss_without_corruption_delivers_frames_untouched() {
    let mut channel = Channel::new(0.0, false, 1);
    let mut journal = Journal::default();
    for _ in 0..50 {
        assert_eq!(
            channel.transmit(frame(), &mut journal),
            Transmission::Delivered(frame())
        );
    }
}

#[test]
fn corruption_flips_exactly_one_bit() {
    let mut channel = Channel::new(0.0, true, 42);
    let mut journal = Journal::default();
    let mut corrupted = 0;
    for _ in 0..200 {
        match channel.transmit(frame(), &mut journal) {
            Transmission::Delivered(bits) => {
                let diff = bit_diff(&frame(), &bits);
                assert!(diff <= 1, "corruption changed {diff} bits");
                if diff == 1 {
                    corrupted += 1;
                }
            }
            Transmission::Lost => panic!("loss disabled"),
        }
    }
    // bit errors strike with probability 0.3; 200 clean draws is implausible
    assert!(corrupted > 0, "expected at least one injected bit error");
    assert!(journal.contains("Channel", "Bit error introduced"));
}

#[test]
fn same_seed_reproduces_the_same_outcomes() {
    let mut a = Channel::new(0.4, true, 7);
    let mut b = Channel::new(0.4, true, 7);
    let mut journal = Journal::default();
    for _ in 0..100 {
        assert_eq!(
            a.transmit(frame(), &mut journal),
            b.transmit(frame(), &mut journal)
        );
    }
}
