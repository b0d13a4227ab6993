//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::sampling::weighted::*;

#[test]
fn test_frame() {
    let frame = WeightedFrame::new(vec![1.0, 2.0, 0.5]).unwrap();
    assert_eq!(frame.cumsum(), &[1.0, 3.0, 3.5]);
    assert_eq!(frame.total(), 3.5);
    assert_eq!(frame.left_edge(1), 1.0);
    assert_eq!(WeightedFrame::uniform(3).unwrap().total(), 3.0);

    assert!(WeightedFrame::new(vec![]).is_err());
    assert!(WeightedFrame::new(vec![1.0, 0.0]).is_err());
    assert!(WeightedFrame::new(vec![1.0, -2.0]).is_err());
    assert!(WeightedFrame::new(vec![f64::NAN]).is_err());
}

#[test]
fn test_single_cycle() {
    let mut iter = WeightedCyclicIterator::new(vec![1.0; 4], 1.0, 0, 1).unwrap();
    let mut visited = Vec::new();
    while let Step::Value(idx) = iter.next_step() {
        visited.push(idx);
    }
    assert_eq!(visited, vec![0, 1, 2, 3]);
    assert_eq!(iter.next_step(), Step::Exhausted);
    assert_eq!(iter.next_step(), Step::Exhausted);
}

#[test]
fn test_uniform_cycles() {
    for start in 0..5 {
        for max_cycle in 1..4 {
            let iter = WeightedCyclicIterator::new(vec![1.0; 5], 1.0, start, max_cycle).unwrap();
            let visited: Vec<usize> = iter.collect();
            let expected: Vec<usize> = (0..5 * max_cycle as usize).map(|k| (start + k) % 5).collect();
            assert_eq!(visited, expected, "start {} max_cycle {}", start, max_cycle);
        }
    }
}

#[test]
fn test_weights() {
    let iter = WeightedCyclicIterator::new(vec![1.0, 2.0, 1.0], 1.0, 0, 1).unwrap();
    assert_eq!(iter.collect::<Vec<_>>(), vec![0, 1, 1, 2]);

    // heavy tiles are visited more often
    let iter = WeightedCyclicIterator::new(vec![0.5, 3.0, 0.5], 0.5, 2, 1).unwrap();
    let visited: Vec<usize> = iter.collect();
    assert_eq!(visited, vec![2, 0, 1, 1, 1, 1, 1, 1]);
}

#[test]
fn test_wrap_around() {
    let mut iter = WeightedCyclicIterator::new(vec![1.0; 4], 1.5, 2, 1).unwrap();
    assert_eq!(iter.next_step(), Step::Value(2));
    assert_eq!(iter.next_step(), Step::Value(3));
    assert_eq!(iter.next_step(), Step::Value(1));
    assert_eq!(iter.cycles(), 0);
    assert_eq!(iter.next_step(), Step::Exhausted);

    // interval longer than the number line
    let iter = WeightedCyclicIterator::new(vec![1.0, 1.0, 1.0], 4.0, 0, 3).unwrap();
    assert_eq!(iter.collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn test_fractional_interval() {
    // 10 * 0.1 covers the line exactly once
    let iter = WeightedCyclicIterator::new(vec![0.5, 0.5], 0.1, 0, 1).unwrap();
    assert_eq!(iter.collect::<Vec<_>>(), vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1]);
}

#[test]
fn test_invalid() {
    assert!(WeightedCyclicIterator::new(vec![1.0; 4], 0.0, 0, 1).is_err());
    assert!(WeightedCyclicIterator::new(vec![1.0; 4], 1.0, 4, 1).is_err());
    assert!(WeightedCyclicIterator::new(vec![1.0; 4], 1.0, 0, 0).is_err());
    assert!(WeightedCyclicIterator::new(vec![1.0, 0.0], 1.0, 0, 1).is_err());
}
