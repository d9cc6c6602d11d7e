/// Invoke a macro once for every suffix of the given list of type names.
#[macro_export]
macro_rules! for_every_tuple {
    ($m:ident !! $head_ty:ident) => {
        $m!($head_ty);
    };
    ($m:ident !! $head_ty:ident, $($tail_ty:ident),*) => (
        $m!($head_ty, $( $tail_ty ),*);
        $crate::for_every_tuple!($m !! $( $tail_ty ),*);
    );
}

/// Invoke a macro for every tuple arity from 1 to 26, with type names `A` through `Z`.
#[macro_export]
macro_rules! all_tuples {
    ($m:ident) => {
        $crate::for_every_tuple!($m !! A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P, Q, R, S, T, U, V, W, X, Y, Z);
    };
}

/// Invoke a macro once for every suffix of the given list of `(type, marker)` name pairs.
#[macro_export]
macro_rules! for_every_tuple_pair {
    ($m:ident !! ($head_ty:ident, $head_marker:ident)) => {
        $m!(($head_ty, $head_marker));
    };
    ($m:ident !! ($head_ty:ident, $head_marker:ident), $(($tail_ty:ident, $tail_marker:ident)),*) => (
        $m!(($head_ty, $head_marker), $( ($tail_ty, $tail_marker) ),*);
        $crate::for_every_tuple_pair!($m !! $( ($tail_ty, $tail_marker) ),*);
    );
}

/// Invoke a macro for every tuple arity from 1 to 16, with each element named by a type and a
/// marker (`(A, MA)` through `(P, MP)`).
#[macro_export]
macro_rules! all_tuple_pairs {
    ($m:ident) => {
        $crate::for_every_tuple_pair!($m !!
            (A, MA), (B, MB), (C, MC), (D, MD), (E, ME), (F, MF), (G, MG), (H, MH),
            (I, MI), (J, MJ), (K, MK), (L, ML), (M, MM), (N, MN), (O, MO), (P, MP));
    };
}

#[cfg(test)]
mod tests {
    trait Arity {
        const ARITY: usize;
    }

    macro_rules! count_arity {
        ($($name: ident),*) => {
            impl<$($name),*> Arity for ($($name,)*) {
                const ARITY: usize = [$(stringify!($name)),*].len();
            }
        }
    }

    all_tuples!(count_arity);

    trait PairArity {
        const ARITY: usize;
    }

    macro_rules! count_pairs {
        ($(($name: ident, $marker: ident)),*) => {
            impl<$($name, $marker),*> PairArity for ($(($name, $marker),)*) {
                const ARITY: usize = [$(stringify!($name)),*].len();
            }
        }
    }

    all_tuple_pairs!(count_pairs);

    #[test]
    fn pairs_cover_every_arity() {
        assert_eq!(<((u8, u8),) as PairArity>::ARITY, 1);
        assert_eq!(<((u8, u8), (u16, u16), (u32, u32)) as PairArity>::ARITY, 3);
    }

    #[test]
    fn covers_every_arity() {
        assert_eq!(<(u8,)>::ARITY, 1);
        assert_eq!(<(u8, u16, u32)>::ARITY, 3);
        assert_eq!(
            <(
                u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8,
                u8, u8, u8, u8, u8
            )>::ARITY,
            26
        );
    }
}
