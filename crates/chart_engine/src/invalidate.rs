//! Invalidation flags exchanged with the host

use bitflags::bitflags;

bitflags! {
    /// Which parts of a chart area must be recomputed or re-rendered.
    ///
    /// Setters return the flags their change requires; the chart area
    /// processes them immediately or defers them while updates are suspended.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InvalidateFlags: u8 {
        /// Series geometry must be recomputed
        const INVALIDATE_SERIES       = 1 << 0;
        /// Axis value domains must be rebuilt
        const RESET_AXES              = 1 << 1;
        /// Axis measure/arrange results are stale
        const INVALIDATE_AXES         = 1 << 2;
        /// Grid lines are stale
        const INVALIDATE_GRID         = 1 << 3;
        /// Annotation state must be rebuilt
        const RESET_ANNOTATIONS       = 1 << 4;
        /// Annotation geometry is stale
        const INVALIDATE_ANNOTATIONS  = 1 << 5;

        const ALL = Self::INVALIDATE_SERIES.bits()
            | Self::RESET_AXES.bits()
            | Self::INVALIDATE_AXES.bits()
            | Self::INVALIDATE_GRID.bits()
            | Self::RESET_ANNOTATIONS.bits()
            | Self::INVALIDATE_ANNOTATIONS.bits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_contains_every_flag() {
        assert!(InvalidateFlags::ALL.contains(InvalidateFlags::RESET_AXES));
        assert!(InvalidateFlags::ALL.contains(InvalidateFlags::INVALIDATE_ANNOTATIONS));
        assert_eq!(InvalidateFlags::default(), InvalidateFlags::empty());
    }

    #[test]
    fn test_flags_accumulate() {
        let mut pending = InvalidateFlags::empty();
        pending |= InvalidateFlags::INVALIDATE_GRID;
        pending |= InvalidateFlags::INVALIDATE_AXES;
        assert!(pending.contains(InvalidateFlags::INVALIDATE_GRID | InvalidateFlags::INVALIDATE_AXES));
        assert!(!pending.contains(InvalidateFlags::RESET_AXES));
    }
}
