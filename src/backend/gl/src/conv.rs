use probe_query::Kind;

pub fn kind_to_gl(kind: Kind) -> u32 {
    match kind {
        Kind::SamplesPassed => glow::SAMPLES_PASSED,
        Kind::AnySamplesPassed => glow::ANY_SAMPLES_PASSED,
        Kind::AnySamplesPassedConservative => glow::ANY_SAMPLES_PASSED_CONSERVATIVE,
        Kind::PrimitivesGenerated => glow::PRIMITIVES_GENERATED,
        Kind::TransformFeedbackPrimitivesWritten => glow::TRANSFORM_FEEDBACK_PRIMITIVES_WRITTEN,
        Kind::TimeElapsed => glow::TIME_ELAPSED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_are_distinct() {
        let kinds = [
            Kind::SamplesPassed,
            Kind::AnySamplesPassed,
            Kind::AnySamplesPassedConservative,
            Kind::PrimitivesGenerated,
            Kind::TransformFeedbackPrimitivesWritten,
            Kind::TimeElapsed,
        ];
        for (i, &a) in kinds.iter().enumerate() {
            for &b in &kinds[i + 1..] {
                assert_ne!(kind_to_gl(a), kind_to_gl(b), "{:?} vs {:?}", a, b);
            }
        }
    }
}
