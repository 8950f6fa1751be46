//! [`ApiModel`] implementations for primitives and std containers

use super::{ApiModel, MapKind, Scalar, Ty, Wrapper};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

macro_rules! impl_scalar {
    ($($ty:ty => $scalar:ident),+ $(,)?) => {
        $(
            impl ApiModel for $ty {
                fn ty() -> Ty {
                    Ty::Scalar(Scalar::$scalar)
                }
            }
        )+
    };
}

impl_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => String,
    str => String,
}

macro_rules! impl_wrapper {
    ($($ty:ident => $wrapper:ident),+ $(,)?) => {
        $(
            impl<T: ApiModel> ApiModel for $ty<T> {
                fn ty() -> Ty {
                    Ty::wrapped(Wrapper::$wrapper, T::ty())
                }
            }
        )+
    };
}

impl_wrapper! {
    Option => Option,
    Vec => Vec,
    VecDeque => VecDeque,
    BTreeSet => BTreeSet,
}

impl<T: ApiModel + ?Sized> ApiModel for Box<T> {
    fn ty() -> Ty {
        Ty::wrapped(Wrapper::Box, T::ty())
    }
}

impl<T: ApiModel + ?Sized> ApiModel for Rc<T> {
    fn ty() -> Ty {
        Ty::wrapped(Wrapper::Rc, T::ty())
    }
}

impl<T: ApiModel + ?Sized> ApiModel for Arc<T> {
    fn ty() -> Ty {
        Ty::wrapped(Wrapper::Arc, T::ty())
    }
}

impl<T: ApiModel, S> ApiModel for HashSet<T, S> {
    fn ty() -> Ty {
        Ty::wrapped(Wrapper::HashSet, T::ty())
    }
}

impl<T: ApiModel> ApiModel for [T] {
    fn ty() -> Ty {
        Ty::wrapped(Wrapper::Vec, T::ty())
    }
}

impl<T: ApiModel, const N: usize> ApiModel for [T; N] {
    fn ty() -> Ty {
        Ty::array(T::ty(), N)
    }
}

impl<K: ApiModel, V: ApiModel, S> ApiModel for HashMap<K, V, S> {
    fn ty() -> Ty {
        Ty::map(MapKind::HashMap, K::ty(), V::ty())
    }
}

impl<K: ApiModel, V: ApiModel> ApiModel for BTreeMap<K, V> {
    fn ty() -> Ty {
        Ty::map(MapKind::BTreeMap, K::ty(), V::ty())
    }
}

// Free-form JSON has no fixed shape to tabulate.
impl ApiModel for serde_json::Value {
    fn ty() -> Ty {
        Ty::unsupported("serde_json::Value")
    }
}
