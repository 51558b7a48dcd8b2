//! CLBG partial sums
//!
//! Nine series summed to `n` terms (`n` from `argv[1]`, default 25000), each
//! printed with `%.9f`, followed by the benchmark harness's elapsed-time line.

use super::{literal, printf};
use crate::memory::{Pointer, Value};
use crate::runtime::{EntryArgs, Program, Runtime, RuntimeError};

const DEFAULT_TERMS: i64 = 25_000;

#[derive(Debug, Default)]
pub struct PartialSums;

impl PartialSums {
    fn dtime(rt: &mut Runtime, tv: &Pointer) -> Result<f64, RuntimeError> {
        let mut args = tv.to_pair().to_vec();
        args.extend([Value::Int(0), Value::Null]);
        rt.call("gettimeofday", &args)?;
        Ok(tv.read(0).as_f64() + tv.read(1).as_f64() / 1_000_000.0)
    }

    fn math(rt: &mut Runtime, name: &str, args: &[f64]) -> Result<f64, RuntimeError> {
        let args: Vec<Value> = args.iter().copied().map(Value::Float).collect();
        let result = rt.call(name, &args)?;
        Ok(result.first().map(Value::as_f64).unwrap_or(f64::NAN))
    }

    fn report(rt: &mut Runtime, sum: f64, label: &str) -> Result<(), RuntimeError> {
        let format = literal(&format!("%.9f\t{}\n", label));
        printf(rt, &format, &[Value::Float(sum)])?;
        Ok(())
    }

    fn sums(rt: &mut Runtime, n: i64) -> Result<(), RuntimeError> {
        let mut sum = 0.0;
        for k in 0..=n {
            sum += Self::math(rt, "pow", &[2.0 / 3.0, k as f64])?;
        }
        Self::report(rt, sum, "(2/3)^k")?;

        sum = 0.0;
        for k in 1..=n {
            sum += 1.0 / Self::math(rt, "sqrt", &[k as f64])?;
        }
        Self::report(rt, sum, "k^-0.5")?;

        sum = 0.0;
        for k in 1..=n {
            let kd = k as f64;
            sum += 1.0 / (kd * (kd + 1.0));
        }
        Self::report(rt, sum, "1/k(k+1)")?;

        sum = 0.0;
        for k in 1..=n {
            let kd = k as f64;
            let sk = Self::math(rt, "sin", &[kd])?;
            sum += 1.0 / (kd * kd * kd * sk * sk);
        }
        Self::report(rt, sum, "Flint Hills")?;

        sum = 0.0;
        for k in 1..=n {
            let kd = k as f64;
            let ck = Self::math(rt, "cos", &[kd])?;
            sum += 1.0 / (kd * kd * kd * ck * ck);
        }
        Self::report(rt, sum, "Cookson Hills")?;

        sum = 0.0;
        for k in 1..=n {
            sum += 1.0 / k as f64;
        }
        Self::report(rt, sum, "Harmonic")?;

        sum = 0.0;
        for k in 1..=n {
            let kd = k as f64;
            sum += 1.0 / (kd * kd);
        }
        Self::report(rt, sum, "Riemann Zeta")?;

        sum = 0.0;
        let mut a = -1.0;
        for k in 1..=n {
            a = -a;
            sum += a / k as f64;
        }
        Self::report(rt, sum, "Alternating Harmonic")?;

        sum = 0.0;
        a = -1.0;
        for k in 1..=n {
            a = -a;
            sum += a / (2.0 * k as f64 - 1.0);
        }
        Self::report(rt, sum, "Gregory")
    }
}

impl Program for PartialSums {
    fn main(&mut self, rt: &mut Runtime, entry: EntryArgs) -> Result<i64, RuntimeError> {
        let tv = match rt.call("calloc", &[Value::Int(2), Value::Int(1)])?.as_slice() {
            [offset, store] => Pointer::from_pair(offset, store),
            _ => None,
        };
        let tv = tv.ok_or_else(|| RuntimeError::NullPointer {
            function: "calloc".to_string(),
        })?;
        let start = Self::dtime(rt, &tv)?;

        let n = match entry.arg_pointer(1) {
            Some(arg) => rt
                .call("atoi", &arg.to_pair())?
                .first()
                .map(Value::as_int)
                .unwrap_or(0),
            None => DEFAULT_TERMS,
        };
        Self::sums(rt, n)?;

        let elapsed = Self::dtime(rt, &tv)? - start;
        printf(rt, &literal("\nELAPSEDTIME=%f\n"), &[Value::Float(elapsed)])?;
        rt.call("free", &tv.to_pair())?;
        Ok(0)
    }
}
