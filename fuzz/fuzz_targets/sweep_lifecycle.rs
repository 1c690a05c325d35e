#![no_main]

use arbitrary::Arbitrary;
use disksweeper::{BoundaryEvent, Error, Radius, Sweeper};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Begin,
    Push { x: f64, y: f64 },
    End,
}

// Arbitrary calls, in arbitrary order, with arbitrary floats: the sweeper
// may return errors but must never panic, and it must never report a
// crossing that was occluded.
fuzz_target!(|ops: Vec<Op>| {
    let mut sweeper = Sweeper::new(Radius::default());
    let mut events: Vec<BoundaryEvent> = Vec::new();
    let mut sink = |ev| events.push(ev);
    for op in &ops {
        let res = match *op {
            Op::Begin => {
                sweeper.begin();
                Ok(())
            }
            Op::Push { x, y } => sweeper.push(x, y, &mut sink).map(|_| ()),
            Op::End => sweeper.end(&mut sink),
        };
        match res {
            Ok(())
            | Err(Error::NaN)
            | Err(Error::Infinity)
            | Err(Error::Unsorted { .. })
            | Err(Error::DegenerateInput { .. })
            | Err(Error::Lifecycle(_)) => {}
            Err(e) => panic!("unexpected error {e}"),
        }
    }
    drop(sink);
    for ev in &events {
        assert!(ev.point().x.is_finite() && ev.point().y.is_finite());
    }
});
